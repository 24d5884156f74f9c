//! # TodoApp API ライブラリ
//!
//! ユーザー登録 API のハンドラ・ユースケース・ルーター構築を公開する。
//! `main.rs` と統合テストの両方から利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;

pub use app_builder::{build_app, build_router};
