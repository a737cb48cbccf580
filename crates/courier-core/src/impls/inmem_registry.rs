//! In-memory task registry.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskId, TaskStatus};
use crate::error::CourierError;
use crate::observability::StatusCounts;
use crate::ports::TaskRegistry;

/// Map and aggregate guarded together.
#[derive(Default)]
struct RegistryState {
    tasks: HashMap<TaskId, Task>,
    counts: StatusCounts,
}

/// `TaskRegistry` backed by a `HashMap` under one `RwLock`.
///
/// The aggregate is maintained incrementally on every mutation instead of
/// being recomputed on read, so `counts()` is O(1). Guards are never held
/// across an await other than acquiring them.
#[derive(Default)]
pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRegistry for InMemoryRegistry {
    async fn insert(&self, id: TaskId, task: Task) -> Result<(), CourierError> {
        let mut state = self.state.write().await;
        let status = task.status;
        match state.tasks.entry(id) {
            Entry::Occupied(_) => return Err(CourierError::DuplicateKey(id)),
            Entry::Vacant(slot) => {
                slot.insert(task);
            }
        }
        state.counts.increment(status);
        Ok(())
    }

    async fn get(&self, id: TaskId) -> Option<Task> {
        let state = self.state.read().await;
        state.tasks.get(&id).cloned()
    }

    async fn get_all(&self) -> Vec<Task> {
        let state = self.state.read().await;
        state.tasks.values().cloned().collect()
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<(), CourierError> {
        let mut state = self.state.write().await;
        let RegistryState { tasks, counts } = &mut *state;

        let task = tasks.get_mut(&id).ok_or(CourierError::NotFound(id))?;
        counts.decrement(task.status);
        task.status = status;
        counts.increment(status);
        Ok(())
    }

    async fn counts(&self) -> StatusCounts {
        self.state.read().await.counts
    }

    async fn snapshot(&self) -> (Vec<Task>, StatusCounts) {
        let state = self.state.read().await;
        (state.tasks.values().cloned().collect(), state.counts)
    }

    async fn len(&self) -> usize {
        self.state.read().await.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use ulid::Ulid;

    fn new_id() -> TaskId {
        TaskId::from_ulid(Ulid::new())
    }

    async fn insert_pending(registry: &InMemoryRegistry) -> TaskId {
        let id = new_id();
        registry
            .insert(id, Task::new(id, json!({"n": id.to_string()})))
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn insert_counts_pending() {
        let registry = InMemoryRegistry::new();
        let id = insert_pending(&registry).await;

        let task = registry.get(id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(
            registry.counts().await,
            StatusCounts {
                pending: 1,
                in_progress: 0,
                completed: 0
            }
        );
    }

    #[tokio::test]
    async fn status_walk_moves_one_count_at_a_time() {
        let registry = InMemoryRegistry::new();
        let id = insert_pending(&registry).await;

        registry
            .update_status(id, TaskStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(
            registry.counts().await,
            StatusCounts {
                pending: 0,
                in_progress: 1,
                completed: 0
            }
        );

        registry
            .update_status(id, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(
            registry.counts().await,
            StatusCounts {
                pending: 0,
                in_progress: 0,
                completed: 1
            }
        );
        assert_eq!(registry.get(id).await.unwrap().status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_and_changes_nothing() {
        let registry = InMemoryRegistry::new();
        let id = insert_pending(&registry).await;
        registry
            .update_status(id, TaskStatus::InProgress)
            .await
            .unwrap();

        let err = registry
            .insert(id, Task::new(id, json!("other")))
            .await
            .unwrap_err();
        assert_eq!(err, CourierError::DuplicateKey(id));

        let task = registry.get(id).await.unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_ne!(task.payload, json!("other"));
        assert_eq!(registry.counts().await.total(), 1);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn missing_task() {
        let registry = InMemoryRegistry::new();
        let id = new_id();

        assert!(registry.get(id).await.is_none());
        assert_eq!(
            registry.update_status(id, TaskStatus::Completed).await,
            Err(CourierError::NotFound(id))
        );
        assert_eq!(registry.counts().await, StatusCounts::default());
        assert!(registry.is_empty().await);
    }

    #[rstest]
    #[case(TaskStatus::Pending)]
    #[case(TaskStatus::InProgress)]
    #[case(TaskStatus::Completed)]
    #[tokio::test]
    async fn same_status_update_keeps_counts(#[case] status: TaskStatus) {
        let registry = InMemoryRegistry::new();
        let id = insert_pending(&registry).await;
        registry.update_status(id, status).await.unwrap();
        let before = registry.counts().await;

        registry.update_status(id, status).await.unwrap();

        assert_eq!(registry.counts().await, before);
        assert_eq!(before.get(status), 1);
    }

    #[tokio::test]
    async fn get_all_returns_every_task() {
        let registry = InMemoryRegistry::new();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(insert_pending(&registry).await);
        }

        let mut listed: Vec<TaskId> = registry.get_all().await.into_iter().map(|t| t.id).collect();
        listed.sort();
        ids.sort();
        assert_eq!(listed, ids);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn aggregate_stays_consistent_under_concurrent_updates() {
        const TASKS: usize = 200;
        let registry = Arc::new(InMemoryRegistry::new());

        let writers: Vec<_> = (0..TASKS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    let id = insert_pending(&registry).await;
                    tokio::task::yield_now().await;
                    registry
                        .update_status(id, TaskStatus::InProgress)
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                    registry
                        .update_status(id, TaskStatus::Completed)
                        .await
                        .unwrap();
                })
            })
            .collect();

        let reader = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                loop {
                    let (tasks, counts) = registry.snapshot().await;
                    assert_eq!(counts.total(), tasks.len());
                    assert_eq!(counts, StatusCounts::tally(tasks.iter().map(|t| t.status)));
                    if counts.completed == TASKS {
                        break;
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        for writer in writers {
            writer.await.unwrap();
        }
        reader.await.unwrap();

        assert_eq!(
            registry.counts().await,
            StatusCounts {
                pending: 0,
                in_progress: 0,
                completed: TASKS
            }
        );
    }
}
