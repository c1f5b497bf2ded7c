use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TaskResult;
use crate::models::Task;

/// Repository trait for Task persistence
///
/// Absence is reported as `Ok(None)`; the error channel only carries storage
/// faults. Writes are unconditional: updating or deleting a missing id is
/// not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert `task`, stamping both timestamps, and return it with its new id
    async fn create(&self, task: Task) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Replace title, description and status of the row with `task.id`
    async fn update(&self, task: Task) -> TaskResult<()>;

    /// Delete a task by ID
    async fn delete(&self, id: i64) -> TaskResult<()>;

    /// All tasks, in no particular order
    async fn list(&self) -> TaskResult<Vec<Task>>;
}

/// Current time at the precision a `TIMESTAMPTZ` column stores
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[derive(Debug, Default)]
struct Store {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, mut task: Task) -> TaskResult<Task> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let timestamp = now();
        task.id = store.last_id;
        task.created_at = timestamp;
        task.updated_at = timestamp;
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.get(&id).cloned())
    }

    async fn update(&self, task: Task) -> TaskResult<()> {
        let mut store = self.store.write().await;

        if let Some(existing) = store.tasks.get_mut(&task.id) {
            existing.title = task.title;
            existing.description = task.description;
            existing.status = task.status;
            existing.updated_at = now();
            tracing::info!(task_id = task.id, "Updated task");
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        let mut store = self.store.write().await;

        if store.tasks.remove(&id).is_some() {
            tracing::info!(task_id = id, "Deleted task");
        }

        Ok(())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.values().cloned().collect())
    }
}
