//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するヘルパー。
//! テストごとにマイグレーション済みのインメモリ DB を作成するため、テスト間で状態は共有されない。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use sqlx::SqlitePool;
use todoapp_domain::{
    password::PasswordHash,
    user::{Email, NewUser},
};
use todoapp_infra::db;

/// テスト用のダミーハッシュ
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$dGVzdA$dGVzdA";

/// マイグレーション済みのインメモリ DB を作成する
pub async fn setup_pool() -> SqlitePool {
    let pool = db::create_pool("sqlite::memory:")
        .await
        .expect("インメモリ DB の作成に失敗");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションに失敗");
    pool
}

/// テスト用の新規ユーザーを作成する
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        email:         Email::new(email).expect("テスト用メールアドレスが不正"),
        fname:         "Taro".to_string(),
        lname:         "Yamada".to_string(),
        password_hash: PasswordHash::new(TEST_PASSWORD_HASH),
    }
}
