//! IdGenerator port - タスク ID 生成の抽象化
//!
//! コアは ID が一意であることだけを前提にしていて、自分では採番しない。
//! タスクを作る側（Dispatcher）がこの trait を通して ID を得る。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（Clock 注入でテストでも決定的に使える）

use crate::domain::TaskId;
use crate::ports::Clock;
use ulid::Ulid;

/// `Send + Sync` を要求（複数の submit から同時に呼ばれる）
pub trait IdGenerator: Send + Sync {
    fn generate_task_id(&self) -> TaskId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// タイムスタンプは `C` から、残り 80 bit は乱数。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_task_id(&self) -> TaskId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        TaskId::from(ulid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let ids: HashSet<TaskId> = (0..1_000).map(|_| id_gen.generate_task_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn timestamp_comes_from_clock() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_task_id();
        let id2 = id_gen.generate_task_id();

        // random part still differs
        assert_ne!(id1, id2);
        assert_eq!(id1.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(id2.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }
}
