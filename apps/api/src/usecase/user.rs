//! ユーザー登録ユースケース

use std::sync::Arc;

use todoapp_domain::{
    password::PlainPassword,
    user::{Email, NewUser, User},
};
use todoapp_infra::{
    PasswordService,
    db::TransactionManager,
    repository::UserRepository,
};

use crate::error::ApiError;

/// メールアドレスが登録済みの場合の 409 メッセージ
pub const EMAIL_ALREADY_REGISTERED: &str = "This email has already been registered.";

/// ユーザー登録の入力
pub struct SignUpInput {
    pub email:    Email,
    pub fname:    String,
    pub lname:    String,
    pub password: PlainPassword,
}

/// ユーザー登録ユースケースの実装
pub struct UserUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    tx_manager:       Arc<dyn TransactionManager>,
    password_service: Arc<dyn PasswordService>,
}

impl UserUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        password_service: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            user_repository,
            tx_manager,
            password_service,
        }
    }

    /// ユーザーを登録する
    ///
    /// 1. メールアドレスで既存ユーザーを検索（見つかれば 409）
    /// 2. パスワードをハッシュ化
    /// 3. トランザクション内で users テーブルに挿入してコミット
    ///
    /// 1 と 3 の間に同じメールアドレスが登録された場合は、
    /// 一意制約違反として 1 と同じ 409 を返す。
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn sign_up(&self, input: SignUpInput) -> Result<User, ApiError> {
        if self
            .user_repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            tracing::info!("登録済みのメールアドレスです");
            return Err(ApiError::Conflict(EMAIL_ALREADY_REGISTERED.to_string()));
        }

        let password_hash = self.password_service.hash(&input.password)?;

        let new_user = NewUser {
            email: input.email,
            fname: input.fname,
            lname: input.lname,
            password_hash,
        };

        let mut tx = self.tx_manager.begin().await?;
        let user = self
            .user_repository
            .insert(&mut tx, &new_user)
            .await
            .map_err(|e| {
                if e.as_conflict().is_some() {
                    tracing::info!("挿入時に一意制約違反を検出しました");
                    ApiError::Conflict(EMAIL_ALREADY_REGISTERED.to_string())
                } else {
                    ApiError::from(e)
                }
            })?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");
        Ok(user)
    }
}
