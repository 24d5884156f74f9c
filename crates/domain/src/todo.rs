//! # To-Do
//!
//! ユーザーが所有する To-Do 項目。
//!
//! HTTP エンドポイントは持たない。スキーマとリポジトリのみ存在し、
//! 所有者の削除に伴うカスケード削除の対象になる。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// To-Do ID（サロゲートキー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 新規 To-Do（永続化前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub owner_id:  UserId,
    pub text:      String,
    /// 未指定なら未完了
    pub completed: bool,
}

impl NewTodo {
    /// 未完了の To-Do を作成する
    pub fn new(owner_id: UserId, text: impl Into<String>) -> Self {
        Self {
            owner_id,
            text: text.into(),
            completed: false,
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// To-Do エンティティ
///
/// # 不変条件
///
/// - 必ずちょうど 1 人のユーザー（`owner_id`）に属する
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    id:        TodoId,
    owner_id:  UserId,
    text:      String,
    completed: bool,
}

impl Todo {
    pub fn from_new(id: TodoId, new_todo: NewTodo) -> Self {
        Self {
            id,
            owner_id: new_todo.owner_id,
            text: new_todo.text,
            completed: new_todo.completed,
        }
    }

    pub fn from_db(id: TodoId, owner_id: UserId, text: String, completed: bool) -> Self {
        Self {
            id,
            owner_id,
            text,
            completed,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
