//! タスク ID
//!
//! ULID を採用:
//! - 128-bit、生成時刻でソート可能
//! - 分散環境でも調整なしで生成できる
//!
//! 採番は [`crate::ports::IdGenerator`] の責務。コアは比較と hash しかしない。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Task の識別子。一度割り当てたら変わらない。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Ulid);

impl TaskId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for TaskId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

// ログでは `task-01H...` の形で出す
impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}
