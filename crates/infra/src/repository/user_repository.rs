//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性は DB が保証**: INSERT 時の UNIQUE 制約違反を [`InfraError::conflict`] に変換する
//! - **書き込みはトランザクション必須**: `insert` / `delete` は [`TxContext`] を要求する
//! - **実行時クエリ**: `sqlx::query_as` と `FromRow` で行を受け取り、ドメイン型に変換する

use async_trait::async_trait;
use sqlx::SqlitePool;
use todoapp_domain::{
    password::PasswordHash,
    user::{Email, NewUser, User, UserId},
};

use crate::{db::TxContext, error::InfraError};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合（エラーではない）
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// ID でユーザーを検索
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

    /// ユーザー数を取得
    async fn count(&self) -> Result<i64, InfraError>;

    /// ユーザーを挿入し、採番済みのユーザーを返す
    ///
    /// メールアドレスが既に登録されている場合は Conflict エラーを返す。
    async fn insert(&self, tx: &mut TxContext, user: &NewUser) -> Result<User, InfraError>;

    /// ユーザーを削除する（所有する To-Do もカスケード削除される）
    ///
    /// 削除した場合は `true`、対象が存在しなかった場合は `false` を返す。
    async fn delete(&self, tx: &mut TxContext, id: UserId) -> Result<bool, InfraError>;
}

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:            i64,
    fname:         String,
    lname:         String,
    email:         String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(
            UserId::from_i64(row.id),
            Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            row.fname,
            row.lname,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// SQLite 実装の UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, fname, lname, email, password_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, fname, lname, email, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn count(&self) -> Result<i64, InfraError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(email = %user.email))]
    async fn insert(&self, tx: &mut TxContext, user: &NewUser) -> Result<User, InfraError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (fname, lname, email, password_hash)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.fname)
        .bind(&user.lname)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(tx.conn())
        .await
        .map_err(|e| InfraError::from_insert(e, "User", user.email.as_str()))?;

        Ok(User::from_new(UserId::from_i64(id), user.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, tx: &mut TxContext, id: UserId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(tx.conn())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
