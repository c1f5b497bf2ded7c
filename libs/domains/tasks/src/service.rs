use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskStatus};
use crate::repository::TaskRepository;

/// Business rules for tasks, sitting between the handlers and a repository
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create_task(&self, task: Task) -> TaskResult<Task>;

    /// Fails with [`TaskError::NotFound`] when no row has `id`
    async fn get_task(&self, id: i64) -> TaskResult<Task>;

    async fn update_task(&self, task: Task) -> TaskResult<()>;

    async fn delete_task(&self, id: i64) -> TaskResult<()>;

    async fn list_tasks(&self) -> TaskResult<Vec<Task>>;
}

/// [`TaskService`] backed by any [`TaskRepository`]
#[derive(Clone)]
pub struct DefaultTaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> DefaultTaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

/// Title first, then status presence, then status value
fn validate(task: &Task) -> TaskResult<()> {
    if task.title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if task.status.is_empty() {
        return Err(TaskError::EmptyStatus);
    }
    if !TaskStatus::is_valid(&task.status) {
        return Err(TaskError::InvalidStatus);
    }
    Ok(())
}

fn check_id(id: i64) -> TaskResult<()> {
    if id < 0 {
        return Err(TaskError::InvalidId);
    }
    Ok(())
}

#[async_trait]
impl<R: TaskRepository> TaskService for DefaultTaskService<R> {
    #[instrument(skip(self, task), fields(task_title = %task.title))]
    async fn create_task(&self, task: Task) -> TaskResult<Task> {
        validate(&task)?;
        self.repository.create(task).await
    }

    #[instrument(skip(self), fields(task_id = id))]
    async fn get_task(&self, id: i64) -> TaskResult<Task> {
        check_id(id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound)
    }

    #[instrument(skip(self, task), fields(task_id = task.id, task_title = %task.title))]
    async fn update_task(&self, task: Task) -> TaskResult<()> {
        validate(&task)?;
        self.repository.update(task).await
    }

    #[instrument(skip(self), fields(task_id = id))]
    async fn delete_task(&self, id: i64) -> TaskResult<()> {
        check_id(id)?;
        self.repository.delete(id).await
    }

    async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }
}
