//! UserRepository 統合テスト
//!
//! インメモリ SQLite を使用したテスト。テストごとに新しい DB を作成し、
//! マイグレーションを適用してから実行する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p todoapp-infra --test user_repository_test
//! ```

mod common;

use common::{TEST_PASSWORD_HASH, new_user, setup_pool};
use pretty_assertions::assert_eq;
use todoapp_domain::user::{Email, UserId};
use todoapp_infra::{
    db::{SqliteTransactionManager, TransactionManager},
    error::InfraErrorKind,
    repository::{SqliteUserRepository, UserRepository},
};

#[tokio::test]
async fn test_挿入したユーザーをメールアドレスで取得できる() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let tx_manager = SqliteTransactionManager::new(pool);

    let mut tx = tx_manager.begin().await.unwrap();
    let created = repo.insert(&mut tx, &new_user("taro@example.com")).await.unwrap();
    tx.commit().await.unwrap();

    let found = repo
        .find_by_email(&Email::new("taro@example.com").unwrap())
        .await
        .unwrap()
        .expect("ユーザーが見つかること");

    assert_eq!(found, created);
    assert_eq!(found.fname(), "Taro");
    assert_eq!(found.lname(), "Yamada");
    assert_eq!(found.password_hash().as_str(), TEST_PASSWORD_HASH);
}

#[tokio::test]
async fn test_存在しないメールアドレスはnoneを返す() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool);

    let result = repo
        .find_by_email(&Email::new("nobody@example.com").unwrap())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_idは挿入ごとに採番される() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let tx_manager = SqliteTransactionManager::new(pool);

    let mut tx = tx_manager.begin().await.unwrap();
    let first = repo.insert(&mut tx, &new_user("a@example.com")).await.unwrap();
    let second = repo.insert(&mut tx, &new_user("b@example.com")).await.unwrap();
    tx.commit().await.unwrap();

    assert!(second.id() > first.id());
    assert_eq!(repo.find_by_id(first.id()).await.unwrap(), Some(first));
}

#[tokio::test]
async fn test_重複メールアドレスの挿入はconflictエラー() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let tx_manager = SqliteTransactionManager::new(pool);

    let mut tx = tx_manager.begin().await.unwrap();
    repo.insert(&mut tx, &new_user("dup@example.com")).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = tx_manager.begin().await.unwrap();
    let err = repo
        .insert(&mut tx, &new_user("dup@example.com"))
        .await
        .unwrap_err();
    drop(tx);

    assert!(matches!(
        err.kind(),
        InfraErrorKind::Conflict { entity, id } if entity == "User" && id == "dup@example.com"
    ));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_コミットしなかった挿入は残らない() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let tx_manager = SqliteTransactionManager::new(pool);

    {
        let mut tx = tx_manager.begin().await.unwrap();
        repo.insert(&mut tx, &new_user("a@example.com")).await.unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_ユーザーを削除できる() {
    let pool = setup_pool().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let tx_manager = SqliteTransactionManager::new(pool);

    let mut tx = tx_manager.begin().await.unwrap();
    let user = repo.insert(&mut tx, &new_user("a@example.com")).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = tx_manager.begin().await.unwrap();
    let deleted = repo.delete(&mut tx, user.id()).await.unwrap();
    let deleted_again = repo.delete(&mut tx, UserId::from_i64(999)).await.unwrap();
    tx.commit().await.unwrap();

    assert!(deleted);
    assert!(!deleted_again);
    assert!(repo.find_by_id(user.id()).await.unwrap().is_none());
}
