//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - ボディは `{"detail": ...}` の 1 フィールドのみ。`detail` はメッセージ文字列か、
//!   フィールド単位のバリデーションエラー配列のどちらか
//!
//! ```json
//! {"detail": "This email has already been registered."}
//! {"detail": [{"loc": ["body", "email"], "msg": "...", "type": "value_error.email"}]}
//! ```

use serde::{Deserialize, Serialize};

/// 500 応答の固定メッセージ（内部情報を漏らさないため）
const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub detail: ErrorDetail,
}

/// `detail` フィールドの中身
///
/// JSON 上はタグなしで表現する（文字列 or 配列）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
   /// 人間可読なメッセージ
   Message(String),
   /// フィールド単位のバリデーションエラー
   Fields(Vec<FieldError>),
}

/// フィールド単位のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
   /// エラー位置（例: `["body", "email"]`）
   pub loc:        Vec<String>,
   /// エラーメッセージ
   pub msg:        String,
   /// エラー種別（例: `value_error.email`）
   #[serde(rename = "type")]
   pub error_type: String,
}

impl FieldError {
   /// リクエストボディ内のフィールドに対するエラーを作成する
   pub fn body_field(
      field: impl Into<String>,
      msg: impl Into<String>,
      error_type: impl Into<String>,
   ) -> Self {
      Self {
         loc:        vec!["body".to_string(), field.into()],
         msg:        msg.into(),
         error_type: error_type.into(),
      }
   }

   /// リクエストボディ全体に対するエラーを作成する
   ///
   /// JSON として解釈できない場合など、特定のフィールドに紐付かないエラーに使う。
   pub fn body(msg: impl Into<String>, error_type: impl Into<String>) -> Self {
      Self {
         loc:        vec!["body".to_string()],
         msg:        msg.into(),
         error_type: error_type.into(),
      }
   }
}

impl ErrorResponse {
   /// メッセージのみのエラーレスポンスを作成する
   pub fn new(detail: impl Into<String>) -> Self {
      Self {
         detail: ErrorDetail::Message(detail.into()),
      }
   }

   /// バリデーションエラーレスポンスを作成する
   pub fn validation(errors: Vec<FieldError>) -> Self {
      Self {
         detail: ErrorDetail::Fields(errors),
      }
   }

   /// 内部エラーレスポンスを作成する
   ///
   /// detail は固定値。
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_ERROR_DETAIL)
   }
}
