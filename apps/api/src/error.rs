//! # API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 422 | `{"detail": [{"loc": [...], "msg": ..., "type": ...}]}` |
//! | `Conflict` | 409 | `{"detail": "<メッセージ>"}` |
//! | `Database` | 500 | `{"detail": "Internal Server Error"}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todoapp_domain::DomainError;
use todoapp_infra::InfraError;
use todoapp_shared::{ErrorResponse, FieldError};

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストの形式・値が不正
    #[error("バリデーションエラー: {0:?}")]
    Validation(Vec<FieldError>),

    /// 一意制約に反する登録
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => Self::Validation(vec![
                FieldError::body_field(field, message, format!("value_error.{field}")),
            ]),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::validation(errors),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            ApiError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
