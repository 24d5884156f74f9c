//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PlainPassword`] | サインアップ時の入力値。ハッシュ化したら破棄する |
//! | [`PasswordHash`] | 永続化用の argon2id PHC 文字列 |
//! | [`PasswordVerifyResult`] | 照合結果 |
//!
//! どちらの型も `Serialize` を実装しないため、レスポンスに紛れ込むことはない。

use std::fmt;

/// 平文パスワード
///
/// 長さ・強度のポリシーは設けない。Debug 出力ではマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

/// パスワードハッシュ
///
/// DB の `password_hash` 列にそのまま保存される形式。
/// ハッシュでもログには出さないため、Debug ではアルゴリズム識別子だけを表示する。
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列から作成する（主に DB からの復元用）
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// PHC 文字列のアルゴリズム識別子（`$argon2id$...` なら `argon2id`）
    pub fn algorithm(&self) -> Option<&str> {
        self.0.strip_prefix('$')?.split('$').next().filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordHash")
            .field(&self.algorithm().unwrap_or("unknown"))
            .finish()
    }
}

/// パスワード照合結果
///
/// bool ではなく専用の型にして、呼び出し側の意図を明確にする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}
