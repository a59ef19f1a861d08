//! Repository for the `goals` and `subgoals` tables.

use sqlx::{PgConnection, PgPool};
use taskdeck_core::types::DbId;

use crate::models::checklist::{ChecklistChange, NewChecklistItem, UpdateChecklistItem};
use crate::models::goal::{CreateGoal, Goal, GoalWithSubgoals, UpdateGoal};
use crate::repositories::checklist::SUBGOALS;

/// Goal columns joined with the owner's public fields.
const SELECT_GOALS: &str = "SELECT g.id, g.user_id, g.aim, g.description, g.completed, \
                            g.created_at, g.updated_at, \
                            u.username AS owner_username, u.email AS owner_email \
                            FROM goals g JOIN users u ON u.id = g.user_id";

/// Provides CRUD operations for goals and their subgoals.
pub struct GoalRepo;

impl GoalRepo {
    /// List all goals, or only those owned by `owner` when given.
    pub async fn list(
        pool: &PgPool,
        owner: Option<DbId>,
    ) -> Result<Vec<GoalWithSubgoals>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load_many(&mut conn, owner).await
    }

    /// List the goals owned by one user.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GoalWithSubgoals>, sqlx::Error> {
        Self::list(pool, Some(user_id)).await
    }

    /// Find a goal by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GoalWithSubgoals>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load_one(&mut conn, id).await
    }

    /// Insert a goal and its initial subgoals in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateGoal) -> Result<GoalWithSubgoals, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO goals (user_id, aim, description, completed)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.aim)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_one(&mut *tx)
        .await?;

        for subgoal in &input.subgoals {
            SUBGOALS.append(&mut tx, id, subgoal).await?;
        }

        let goal = Self::load_one(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(goal)
    }

    /// Update a goal. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no goal with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGoal,
    ) -> Result<Option<GoalWithSubgoals>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE goals SET
                aim = COALESCE($2, aim),
                description = COALESCE($3, description),
                completed = COALESCE($4, completed)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.aim)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        let goal = Self::load_one(&mut tx, id).await?;
        tx.commit().await?;
        Ok(goal)
    }

    /// Delete a goal; its subgoals go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a subgoal. Returns `None` if the goal does not exist.
    pub async fn add_subgoal(
        pool: &PgPool,
        goal_id: DbId,
        item: &NewChecklistItem,
    ) -> Result<Option<GoalWithSubgoals>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBGOALS.lock_parent(&mut tx, goal_id).await? {
            return Ok(None);
        }
        SUBGOALS.append(&mut tx, goal_id, item).await?;

        let goal = Self::load_one(&mut tx, goal_id).await?;
        tx.commit().await?;
        Ok(goal)
    }

    /// Update one subgoal of a goal.
    pub async fn update_subgoal(
        pool: &PgPool,
        goal_id: DbId,
        subgoal_id: DbId,
        input: &UpdateChecklistItem,
    ) -> Result<ChecklistChange<GoalWithSubgoals>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBGOALS.lock_parent(&mut tx, goal_id).await? {
            return Ok(ChecklistChange::ParentNotFound);
        }
        if !SUBGOALS.update(&mut tx, goal_id, subgoal_id, input).await? {
            return Ok(ChecklistChange::ItemNotFound);
        }

        let goal = Self::load_one(&mut tx, goal_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(ChecklistChange::Applied(goal))
    }

    /// Delete one subgoal of a goal, matched by id.
    pub async fn delete_subgoal(
        pool: &PgPool,
        goal_id: DbId,
        subgoal_id: DbId,
    ) -> Result<ChecklistChange<GoalWithSubgoals>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !SUBGOALS.lock_parent(&mut tx, goal_id).await? {
            return Ok(ChecklistChange::ParentNotFound);
        }
        if !SUBGOALS.delete(&mut tx, goal_id, subgoal_id).await? {
            return Ok(ChecklistChange::ItemNotFound);
        }

        let goal = Self::load_one(&mut tx, goal_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(ChecklistChange::Applied(goal))
    }

    // -----------------------------------------------------------------------
    // Loading helpers
    // -----------------------------------------------------------------------

    async fn load_one(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<GoalWithSubgoals>, sqlx::Error> {
        let query = format!("{SELECT_GOALS} WHERE g.id = $1");
        let Some(goal) = sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        Ok(Self::attach_subgoals(conn, vec![goal]).await?.pop())
    }

    async fn load_many(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<Vec<GoalWithSubgoals>, sqlx::Error> {
        let query =
            format!("{SELECT_GOALS} WHERE ($1::BIGINT IS NULL OR g.user_id = $1) ORDER BY g.id");
        let goals = sqlx::query_as::<_, Goal>(&query)
            .bind(owner)
            .fetch_all(&mut *conn)
            .await?;
        Self::attach_subgoals(conn, goals).await
    }

    async fn attach_subgoals(
        conn: &mut PgConnection,
        goals: Vec<Goal>,
    ) -> Result<Vec<GoalWithSubgoals>, sqlx::Error> {
        let ids: Vec<DbId> = goals.iter().map(|g| g.id).collect();
        let mut subgoals = SUBGOALS.load_for(conn, &ids).await?;
        Ok(goals
            .into_iter()
            .map(|goal| GoalWithSubgoals {
                subgoals: subgoals.remove(&goal.id).unwrap_or_default(),
                goal,
            })
            .collect())
    }
}
