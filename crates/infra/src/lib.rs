//! # TodoApp インフラ層
//!
//! 外部システムとの接続を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite への接続プール管理とマイグレーション
//! - **リポジトリ実装**: ユーザーと To-Do の永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と照合
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoapp_infra::{db, repository::SqliteUserRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("sqlite://todoapp.db").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let users = SqliteUserRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::InfraError;
pub use password::{Argon2PasswordService, PasswordService};
