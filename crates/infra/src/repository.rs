//! # リポジトリ
//!
//! エンティティの永続化を担当するリポジトリ群。
//! 読み取りはプールから、書き込みは [`TxContext`](crate::db::TxContext) 経由で行う。

pub mod todo_repository;
pub mod user_repository;

pub use todo_repository::{SqliteTodoRepository, TodoRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
