//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/users` - ユーザー登録
//!
//! ## レスポンス例
//!
//! ```json
//! {"id": 1, "email": "a@example.com", "fname": "A", "lname": "B"}
//! ```
//!
//! パスワード（ハッシュを含む）はレスポンスに含めない。

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use todoapp_domain::{
    password::PlainPassword,
    user::{Email, User},
};
use validator::Validate;

use crate::{
    error::ApiError,
    extract::ValidatedJson,
    usecase::{SignUpInput, UserUseCase},
};

/// ユーザーハンドラの共有状態
pub struct UserState {
    pub usecase: Arc<dyn UserUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
///
/// パスワードを含むため `Debug` は実装しない。
#[derive(Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "value is not a valid email address"))]
    pub email:    String,
    pub fname:    String,
    pub lname:    String,
    pub password: String,
}

/// ユーザーレスポンス
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:    i64,
    pub email: String,
    pub fname: String,
    pub lname: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id:    user.id().as_i64(),
            email: user.email().as_str().to_string(),
            fname: user.fname().to_string(),
            lname: user.lname().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /api/users
///
/// ユーザーを登録する。
///
/// - 200: 登録したユーザー
/// - 409: メールアドレスが登録済み
/// - 422: リクエストの形式・値が不正（何も書き込まない）
#[tracing::instrument(skip_all)]
pub async fn sign_up(
    State(state): State<Arc<UserState>>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    // ドメイン部の正規化と、スキーマ検証より厳しいドメイン部の規則（`.` 区切り）はここで適用する
    let input = SignUpInput {
        email:    Email::new(req.email)?,
        fname:    req.fname,
        lname:    req.lname,
        password: PlainPassword::new(req.password),
    };

    let user = state.usecase.sign_up(input).await?;

    Ok(Json(UserResponse::from(&user)))
}
