//! # ユースケース層
//!
//! API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラテストでスタブに差し替えられるようにトレイトを定義
//! - **依存性注入**: リポジトリ・トランザクション管理・パスワードハッシュを `Arc<dyn Trait>` で注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod user;

use async_trait::async_trait;
use todoapp_domain::user::User;
pub use user::{EMAIL_ALREADY_REGISTERED, SignUpInput, UserUseCaseImpl};

use crate::error::ApiError;

/// ユーザーユースケーストレイト
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 採番済みのユーザー
    /// - `Err(ApiError::Conflict)`: メールアドレスが登録済み
    /// - `Err(ApiError::Database)`: データベースエラー
    async fn sign_up(&self, input: SignUpInput) -> Result<User, ApiError>;
}

#[async_trait]
impl UserUseCase for UserUseCaseImpl {
    async fn sign_up(&self, input: SignUpInput) -> Result<User, ApiError> {
        self.sign_up(input).await
    }
}
