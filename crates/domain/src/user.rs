//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は数値のサロゲートキーをラップし、TodoId との取り違えを防ぐ
//! - **不変性**: エンティティのフィールドは getter 経由でのみ参照する
//! - **資格情報の隔離**: パスワードはハッシュ（[`PasswordHash`]）としてのみ保持し、
//!   Serialize を実装しない
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todoapp_domain::{
//!     password::PasswordHash,
//!     user::{Email, NewUser, User, UserId},
//! };
//!
//! let new_user = NewUser {
//!     email:         Email::new("a@example.com")?,
//!     fname:         "A".to_string(),
//!     lname:         "B".to_string(),
//!     password_hash: PasswordHash::new("$argon2id$..."),
//! };
//!
//! // DB が id を採番した後に復元する
//! let user = User::from_new(UserId::from_i64(1), new_user);
//! assert_eq!(user.email().as_str(), "a@example.com");
//! # Ok(())
//! # }
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// メールアドレスの最大長（RFC 5321 のパス長上限）
const EMAIL_MAX_LEN: usize = 254;

/// ユーザー ID（サロゲートキー）
///
/// データベースが採番する。アプリケーション側で生成することはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時に構造を検証し、ドメイン部を小文字に正規化する。
/// ドメイン部は大文字小文字を区別しないため、`a@EXAMPLE.COM` と `a@example.com` は
/// 同じ値になり、一意性の判定もこの正規化後の値で行われる。
/// ローカル部は区別される可能性があるため変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式で、どちらも空でない
    /// - `@` はちょうど 1 つ
    /// - 空白文字を含まない
    /// - ドメイン部は `.` で区切られた 2 つ以上のラベルからなり、空のラベルを含まない
    /// - 最大 254 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::validation("email", "メールアドレスは必須です"));
        }

        if value.chars().count() > EMAIL_MAX_LEN {
            return Err(DomainError::validation(
                "email",
                format!("メールアドレスは{EMAIL_MAX_LEN}文字以内である必要があります"),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::validation("email", "メールアドレスの形式が不正です"));
        };

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || value.chars().any(char::is_whitespace)
        {
            return Err(DomainError::validation("email", "メールアドレスの形式が不正です"));
        }

        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(DomainError::validation(
                "email",
                "メールアドレスのドメイン部が不正です",
            ));
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 新規ユーザー（永続化前）
///
/// id は DB の採番に任せるため持たない。
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email:         Email,
    pub fname:         String,
    pub lname:         String,
    pub password_hash: PasswordHash,
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` は全ユーザーで一意（DB の UNIQUE 制約が最終的な保証）
/// - パスワードは平文で保持しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    email:         Email,
    fname:         String,
    lname:         String,
    password_hash: PasswordHash,
}

impl User {
    /// 採番済み ID と永続化前の値からユーザーを組み立てる
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            email: new_user.email,
            fname: new_user.fname,
            lname: new_user.lname,
            password_hash: new_user.password_hash,
        }
    }

    /// データベースの行からユーザーを復元する
    pub fn from_db(
        id: UserId,
        email: Email,
        fname: String,
        lname: String,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            email,
            fname,
            lname,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn fname(&self) -> &str {
        &self.fname
    }

    pub fn lname(&self) -> &str {
        &self.lname
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
