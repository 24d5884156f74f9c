//! # SQLite データベース接続管理
//!
//! 接続プールの作成、マイグレーション、リクエスト単位のトランザクションを扱う。
//!
//! ## 設計方針
//!
//! - **グローバル状態を持たない**: プールは `main` で一度だけ作り、リポジトリに注入する
//! - **スコープ付き取得**: 書き込みは [`TxContext`] の中で行う。コミットせずにドロップすると
//!   ロールバックされ、コネクションはどの経路でもプールに返却される
//! - **外部キー有効化**: ユーザー削除時の To-Do カスケード削除に必要
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoapp_infra::db;
//!
//! let pool = db::create_pool("sqlite://todoapp.db").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    Sqlite,
    SqliteConnection,
    SqlitePool,
    Transaction,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// ファイル DB 使用時の最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 接続 URL がインメモリ DB を指しているか
///
/// インメモリ DB はコネクションごとに別の DB になるため、接続を 1 本に固定する。
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// 接続プールを作成する
///
/// # 引数
///
/// * `database_url` - SQLite 接続 URL
///   - ファイル: `sqlite://todoapp.db`（存在しなければ作成する）
///   - インメモリ: `sqlite::memory:`（テスト用）
///
/// # 設定値
///
/// - 外部キー制約: 有効
/// - `max_connections`: ファイル DB は 10、インメモリ DB は 1
/// - `acquire_timeout`: 5 秒
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        // アイドル切断されると DB ごと消えるため、寿命を無制限にする
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    pool_options
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

/// データベースマイグレーションを実行する
///
/// `migrations/` のファイルを埋め込み、未適用のものだけを順に適用する。
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// DB に到達できるかを確認する（Readiness Check 用）
pub async fn ping(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// =============================================================================
// TxContext
// =============================================================================

/// トランザクションコンテキスト
///
/// 書き込みリポジトリメソッドの必須引数。
/// トランザクションなしの書き込みをコンパイルエラーにする。
///
/// # ライフサイクル
///
/// 1. `TransactionManager::begin()` で作成（プールからコネクションを 1 本取得）
/// 2. 書き込みメソッドに `&mut TxContext` として渡す
/// 3. `commit()` でコミット、またはドロップでロールバック
///
/// どちらの経路でもコネクションはプールに返却される。
pub struct TxContext(TxContextInner);

enum TxContextInner {
    Sqlite(Transaction<'static, Sqlite>),
    #[cfg(any(test, feature = "test-utils"))]
    Mock,
}

impl TxContext {
    pub(crate) async fn begin_sqlite(pool: &SqlitePool) -> Result<Self, InfraError> {
        Ok(Self(TxContextInner::Sqlite(pool.begin().await?)))
    }

    /// テスト用のモック TxContext を作成する
    ///
    /// Mock リポジトリはインメモリ実装のため、実際のトランザクションは不要。
    #[cfg(any(test, feature = "test-utils"))]
    pub fn mock() -> Self {
        Self(TxContextInner::Mock)
    }

    /// トランザクションをコミットする
    pub async fn commit(self) -> Result<(), InfraError> {
        match self.0 {
            TxContextInner::Sqlite(tx) => {
                tx.commit().await?;
                Ok(())
            }
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => Ok(()),
        }
    }

    /// トランザクション内の DB コネクションを取得する
    ///
    /// SQLite リポジトリ実装が `.execute(tx.conn())` として使用する。
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        match &mut self.0 {
            TxContextInner::Sqlite(tx) => &mut **tx,
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => {
                panic!("BUG: conn() called on Mock TxContext. Mock repos should not call conn().")
            }
        }
    }
}

// =============================================================================
// TransactionManager
// =============================================================================

/// トランザクション管理 trait
///
/// ユースケース層はプールに直接依存せず、この trait 経由でトランザクションを開始する。
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<TxContext, InfraError>;
}

/// SQLite 用 TransactionManager 実装
#[derive(Debug, Clone)]
pub struct SqliteTransactionManager {
    pool: SqlitePool,
}

impl SqliteTransactionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for SqliteTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        TxContext::begin_sqlite(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_tx_contextはsendを実装している() {
        assert_send::<TxContext>();
    }

    #[test]
    fn test_transaction_manager_traitはsendとsyncを実装している() {
        assert_send_sync::<SqliteTransactionManager>();
        assert_send_sync::<Box<dyn TransactionManager>>();
    }

    #[rstest]
    #[case("sqlite::memory:", true)]
    #[case("sqlite://file:test?mode=memory&cache=shared", true)]
    #[case("sqlite://todoapp.db", false)]
    fn test_インメモリdbの判定(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_in_memory(url), expected);
    }

    #[tokio::test]
    async fn test_インメモリdbに接続してpingできる() {
        let pool = create_pool("sqlite::memory:").await.unwrap();

        assert!(ping(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_コミットせずにドロップするとロールバックされる() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        let manager = SqliteTransactionManager::new(pool.clone());

        {
            let mut tx = manager.begin().await.unwrap();
            sqlx::query("INSERT INTO t (v) VALUES (1)")
                .execute(tx.conn())
                .await
                .unwrap();
            // commit せずにスコープを抜ける
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_コミットすると書き込みが確定する() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        let manager = SqliteTransactionManager::new(pool.clone());

        let mut tx = manager.begin().await.unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (1)")
            .execute(tx.conn())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
