//! # ドメイン層エラー定義
//!
//! 値オブジェクト生成時のルール違反を表現するエラー型。
//!
//! API 層でこのエラーを受け取り、422 Unprocessable Entity に変換する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がドメインのルールに違反している場合に使用する。
    /// `field` は違反したフィールド名で、API 層のエラー位置（`loc`）に使う。
    #[error("バリデーションエラー（{field}）: {message}")]
    Validation {
        field:   &'static str,
        message: String,
    },
}

impl DomainError {
    /// バリデーションエラーを作成する
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
