//! # TodoApp ドメイン層
//!
//! ユーザーと、ユーザーが所有する To-Do のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘            ↗
//!      shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーエンティティとメールアドレス
//! - [`todo`] - To-Do エンティティ
//! - [`password`] - パスワード関連の値オブジェクト

pub mod error;
pub mod password;
pub mod todo;
pub mod user;

pub use error::DomainError;
