//! # TodoApp 共有ユーティリティ
//!
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（HTTP レスポンスへの変換は API 層の責務）

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorDetail, ErrorResponse, FieldError};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
