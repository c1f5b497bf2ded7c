use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::TaskResult;
use crate::models::Task;
use crate::repository::{TaskRepository, now};

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, status, created_at, updated_at) VALUES ($1, $2, $3, $4, $5) RETURNING id";
const SELECT_TASK: &str = "SELECT id, title, description, status, created_at, updated_at FROM tasks WHERE id = $1";
const SELECT_TASKS: &str =
    "SELECT id, title, description, status, created_at, updated_at FROM tasks";
const UPDATE_TASK: &str =
    "UPDATE tasks SET title = $2, description = $3, status = $4, updated_at = $5 WHERE id = $1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = $1";

/// PostgreSQL implementation of TaskRepository over raw SQL
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// One row of the `tasks` table
#[derive(Debug, FromQueryResult)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedId {
    id: i64,
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, mut task: Task) -> TaskResult<Task> {
        let timestamp = now();
        task.created_at = timestamp;
        task.updated_at = timestamp;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INSERT_TASK,
            [
                task.title.clone().into(),
                task.description.clone().into(),
                task.status.clone().into(),
                task.created_at.into(),
                task.updated_at.into(),
            ],
        );

        let inserted = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotInserted)?;

        task.id = inserted.id;
        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, SELECT_TASK, [id.into()]);

        let row = TaskRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(Task::from))
    }

    async fn update(&self, task: Task) -> TaskResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPDATE_TASK,
            [
                task.id.into(),
                task.title.into(),
                task.description.into(),
                task.status.into(),
                now().into(),
            ],
        );

        let result = self.db.execute_raw(stmt).await?;
        tracing::info!(
            task_id = task.id,
            rows_affected = result.rows_affected(),
            "Updated task"
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, DELETE_TASK, [id.into()]);

        let result = self.db.execute_raw(stmt).await?;
        tracing::info!(
            task_id = id,
            rows_affected = result.rows_affected(),
            "Deleted task"
        );
        Ok(())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let stmt = Statement::from_string(DbBackend::Postgres, SELECT_TASKS);

        let rows = TaskRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }
}
