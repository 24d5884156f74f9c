//! # カスタムエクストラクタ
//!
//! リクエストボディを JSON としてデシリアライズし、`validator` のルールで検証する。
//! どちらの段階で失敗しても 422 Unprocessable Entity とフィールド単位のエラーを返すため、
//! ハンドラ本体は検証済みの値だけを受け取る。

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use todoapp_shared::FieldError;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON ボディを受け取り、検証済みの値を取り出すエクストラクタ
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(vec![json_rejection_to_field_error(&rejection)])
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(validation_errors_to_field_errors(&errors)))?;

        Ok(Self(value))
    }
}

/// JSON として受け取れなかった理由をフィールドエラーに変換する
///
/// 必須フィールドの欠落はそのフィールドの位置を指す。それ以外（構文エラー、型違い、
/// Content-Type 不一致）はボディ全体の `json_invalid` とする。
fn json_rejection_to_field_error(rejection: &JsonRejection) -> FieldError {
    let message = rejection.body_text();

    match missing_field_name(&message) {
        Some(field) => FieldError::body_field(field, "Field required", "missing"),
        None => FieldError::body(message, "json_invalid"),
    }
}

/// serde のエラーメッセージ ``missing field `email` `` からフィールド名を取り出す
fn missing_field_name(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}

/// `validator` のエラーをフィールドエラーに変換する
///
/// 出力順を安定させるため、フィールド名でソートする。
fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map_or_else(|| format!("invalid {field}"), ToString::to_string);
                FieldError::body_field(field.to_string(), msg, format!("value_error.{}", e.code))
            })
        })
        .collect()
}
