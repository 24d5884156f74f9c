//! # テスト用モック
//!
//! ユースケース・ハンドラテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoapp-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use todoapp_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{Email, NewUser, User, UserId},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    password::PasswordService,
    repository::UserRepository,
};

// ===== MockUserRepository =====

/// インメモリの UserRepository
///
/// 実 DB と同じく、メールアドレスの重複挿入は Conflict エラーになる。
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:              Arc<Mutex<Vec<User>>>,
    conflict_on_insert: Arc<AtomicBool>,
    fail_with_db_error: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存ユーザーとして登録する（ID は自動採番）
    pub fn add_user(&self, new_user: NewUser) -> User {
        let mut users = self.users.lock().unwrap();
        let user = User::from_new(next_user_id(&users), new_user);
        users.push(user.clone());
        user
    }

    /// 事前チェックを通過した後に別リクエストが先に挿入した状況を再現する
    ///
    /// `find_by_email` は常に `None` を返し、`insert` は Conflict を返す。
    pub fn simulate_concurrent_insert(&self) {
        self.conflict_on_insert.store(true, Ordering::SeqCst);
    }

    /// すべての操作を Database エラーにする
    pub fn fail_with_db_error(&self) {
        self.fail_with_db_error.store(true, Ordering::SeqCst);
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), InfraError> {
        if self.fail_with_db_error.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

fn next_user_id(users: &[User]) -> UserId {
    let max = users.iter().map(|u| u.id().as_i64()).max().unwrap_or(0);
    UserId::from_i64(max + 1)
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        self.check_failure()?;
        if self.conflict_on_insert.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        self.check_failure()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn count(&self) -> Result<i64, InfraError> {
        self.check_failure()?;
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn insert(&self, _tx: &mut TxContext, user: &NewUser) -> Result<User, InfraError> {
        self.check_failure()?;
        let mut users = self.users.lock().unwrap();
        if self.conflict_on_insert.load(Ordering::SeqCst)
            || users.iter().any(|u| u.email() == &user.email)
        {
            return Err(InfraError::conflict("User", user.email.as_str()));
        }
        let created = User::from_new(next_user_id(&users), user.clone());
        users.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, _tx: &mut TxContext, id: UserId) -> Result<bool, InfraError> {
        self.check_failure()?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id() != id);
        Ok(users.len() < before)
    }
}

// ===== MockTransactionManager =====

/// 常にモックの [`TxContext`] を返す TransactionManager
///
/// `begin()` の呼び出し回数を記録する。
#[derive(Clone, Default)]
pub struct MockTransactionManager {
    begun: Arc<AtomicUsize>,
}

impl MockTransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_count(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        self.begun.fetch_add(1, Ordering::SeqCst);
        Ok(TxContext::mock())
    }
}

// ===== MockPasswordService =====

/// ハッシュ計算を行わない PasswordService
///
/// `$mock$<平文>` 形式の文字列を返す。
#[derive(Clone, Default)]
pub struct MockPasswordService {
    hashed: Arc<AtomicUsize>,
}

impl MockPasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash_count(&self) -> usize {
        self.hashed.load(Ordering::SeqCst)
    }
}

impl PasswordService for MockPasswordService {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        self.hashed.fetch_add(1, Ordering::SeqCst);
        Ok(PasswordHash::new(format!("$mock${}", password.as_str())))
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        Ok(PasswordVerifyResult::from(
            hash.as_str() == format!("$mock${}", password.as_str()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email:         Email::new(email).unwrap(),
            fname:         "A".to_string(),
            lname:         "B".to_string(),
            password_hash: PasswordHash::new("$mock$x"),
        }
    }

    #[tokio::test]
    async fn test_モックも重複メールアドレスの挿入はconflict() {
        let repo = MockUserRepository::new();
        let mut tx = TxContext::mock();
        repo.insert(&mut tx, &new_user("a@example.com")).await.unwrap();

        let result = repo.insert(&mut tx, &new_user("a@example.com")).await;

        assert!(result.unwrap_err().as_conflict().is_some());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_同時挿入モードでは事前検索をすり抜けて挿入で競合する() {
        let repo = MockUserRepository::new();
        repo.simulate_concurrent_insert();
        let email = Email::new("a@example.com").unwrap();

        assert!(repo.find_by_email(&email).await.unwrap().is_none());
        let result = repo.insert(&mut TxContext::mock(), &new_user("a@example.com")).await;

        assert!(result.unwrap_err().as_conflict().is_some());
    }
}
