//! Repository for the `tasks` and `subtasks` tables.
//!
//! Every read returns the full aggregate: the task row, its owner's public
//! fields and its subtasks in position order.

use sqlx::{PgConnection, PgPool};
use taskdeck_core::levels::Level;
use taskdeck_core::types::DbId;

use crate::models::checklist::{ChecklistChange, NewChecklistItem, UpdateChecklistItem};
use crate::models::task::{CreateTask, Task, TaskWithSubtasks, UpdateTask};
use crate::repositories::checklist::SUBTASKS;

/// Task columns joined with the owner's public fields.
const SELECT_TASKS: &str = "SELECT t.id, t.user_id, t.title, t.description, t.completed, \
                            t.due_date, t.priority, t.urgency, t.created_at, t.updated_at, \
                            u.username AS owner_username, u.email AS owner_email \
                            FROM tasks t JOIN users u ON u.id = t.user_id";

/// Provides CRUD operations for tasks and their subtasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List all tasks, or only those owned by `owner` when given.
    pub async fn list(
        pool: &PgPool,
        owner: Option<DbId>,
    ) -> Result<Vec<TaskWithSubtasks>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load_many(&mut conn, owner).await
    }

    /// List the tasks owned by one user.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskWithSubtasks>, sqlx::Error> {
        Self::list(pool, Some(user_id)).await
    }

    /// Find a task by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TaskWithSubtasks>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load_one(&mut conn, id).await
    }

    /// Insert a task and its initial subtasks in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<TaskWithSubtasks, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO tasks (user_id, title, description, completed, due_date, priority, urgency)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(input.due_date)
        .bind(input.priority.as_str())
        .bind(input.urgency.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for subtask in &input.subtasks {
            SUBTASKS.append(&mut tx, id, subtask).await?;
        }

        let task = Self::load_one(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(task)
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no task with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<TaskWithSubtasks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                completed = COALESCE($4, completed),
                due_date = COALESCE($5, due_date),
                priority = COALESCE($6, priority),
                urgency = COALESCE($7, urgency)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(input.due_date)
        .bind(input.priority.map(Level::as_str))
        .bind(input.urgency.map(Level::as_str))
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        let task = Self::load_one(&mut tx, id).await?;
        tx.commit().await?;
        Ok(task)
    }

    /// Delete a task; its subtasks go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a subtask. Returns `None` if the task does not exist.
    pub async fn add_subtask(
        pool: &PgPool,
        task_id: DbId,
        item: &NewChecklistItem,
    ) -> Result<Option<TaskWithSubtasks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBTASKS.lock_parent(&mut tx, task_id).await? {
            return Ok(None);
        }
        SUBTASKS.append(&mut tx, task_id, item).await?;

        let task = Self::load_one(&mut tx, task_id).await?;
        tx.commit().await?;
        Ok(task)
    }

    /// Update one subtask of a task.
    pub async fn update_subtask(
        pool: &PgPool,
        task_id: DbId,
        subtask_id: DbId,
        input: &UpdateChecklistItem,
    ) -> Result<ChecklistChange<TaskWithSubtasks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBTASKS.lock_parent(&mut tx, task_id).await? {
            return Ok(ChecklistChange::ParentNotFound);
        }
        if !SUBTASKS.update(&mut tx, task_id, subtask_id, input).await? {
            return Ok(ChecklistChange::ItemNotFound);
        }

        let task = Self::load_one(&mut tx, task_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(ChecklistChange::Applied(task))
    }

    /// Delete one subtask of a task, matched by id.
    pub async fn delete_subtask(
        pool: &PgPool,
        task_id: DbId,
        subtask_id: DbId,
    ) -> Result<ChecklistChange<TaskWithSubtasks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBTASKS.lock_parent(&mut tx, task_id).await? {
            return Ok(ChecklistChange::ParentNotFound);
        }
        if !SUBTASKS.delete(&mut tx, task_id, subtask_id).await? {
            return Ok(ChecklistChange::ItemNotFound);
        }

        let task = Self::load_one(&mut tx, task_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(ChecklistChange::Applied(task))
    }

    // -----------------------------------------------------------------------
    // Loading helpers
    // -----------------------------------------------------------------------

    async fn load_one(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<TaskWithSubtasks>, sqlx::Error> {
        let query = format!("{SELECT_TASKS} WHERE t.id = $1");
        let Some(task) = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        Ok(Self::attach_subtasks(conn, vec![task]).await?.pop())
    }

    async fn load_many(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<Vec<TaskWithSubtasks>, sqlx::Error> {
        let query =
            format!("{SELECT_TASKS} WHERE ($1::BIGINT IS NULL OR t.user_id = $1) ORDER BY t.id");
        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(owner)
            .fetch_all(&mut *conn)
            .await?;
        Self::attach_subtasks(conn, tasks).await
    }

    async fn attach_subtasks(
        conn: &mut PgConnection,
        tasks: Vec<Task>,
    ) -> Result<Vec<TaskWithSubtasks>, sqlx::Error> {
        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
        let mut subtasks = SUBTASKS.load_for(conn, &ids).await?;
        Ok(tasks
            .into_iter()
            .map(|task| TaskWithSubtasks {
                subtasks: subtasks.remove(&task.id).unwrap_or_default(),
                task,
            })
            .collect())
    }
}
