//! # TodoRepository
//!
//! To-Do の永続化を担当するリポジトリ。
//!
//! To-Do は必ず 1 人のユーザーに属する。所有者が削除されると
//! 外部キーの `ON DELETE CASCADE` により一緒に削除される。

use async_trait::async_trait;
use sqlx::SqlitePool;
use todoapp_domain::{
    todo::{NewTodo, Todo, TodoId},
    user::UserId,
};

use crate::{db::TxContext, error::InfraError};

/// To-Do リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// To-Do を挿入し、採番済みの To-Do を返す
    ///
    /// 所有者が存在しない場合は外部キー制約違反（Database エラー）になる。
    async fn insert(&self, tx: &mut TxContext, todo: &NewTodo) -> Result<Todo, InfraError>;

    /// 所有者の To-Do を ID 順に取得
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Todo>, InfraError>;
}

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:        i64,
    text:      String,
    completed: bool,
    owner_id:  i64,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(
            TodoId::from_i64(row.id),
            UserId::from_i64(row.owner_id),
            row.text,
            row.completed,
        )
    }
}

/// SQLite 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(owner_id = %todo.owner_id))]
    async fn insert(&self, tx: &mut TxContext, todo: &NewTodo) -> Result<Todo, InfraError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO todos (text, completed, owner_id)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.owner_id.as_i64())
        .fetch_one(tx.conn())
        .await?;

        Ok(Todo::from_new(TodoId::from_i64(id), todo.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%owner_id))]
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Todo>, InfraError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, text, completed, owner_id
            FROM todos
            WHERE owner_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }
}
