//! Queries shared by the `subtasks` and `subgoals` child tables.
//!
//! Every mutation runs inside the caller's transaction after the parent row
//! has been locked with [`ChecklistTable::lock_parent`], so concurrent
//! appends to the same parent serialize and cannot hand out the same
//! position.

use std::collections::HashMap;

use sqlx::PgConnection;
use taskdeck_core::types::DbId;

use crate::models::checklist::{ChecklistItem, NewChecklistItem, UpdateChecklistItem};

/// Table and column names of one checklist flavour.
pub(crate) struct ChecklistTable {
    pub parent_table: &'static str,
    pub table: &'static str,
    pub parent_column: &'static str,
}

pub(crate) const SUBTASKS: ChecklistTable = ChecklistTable {
    parent_table: "tasks",
    table: "subtasks",
    parent_column: "task_id",
};

pub(crate) const SUBGOALS: ChecklistTable = ChecklistTable {
    parent_table: "goals",
    table: "subgoals",
    parent_column: "goal_id",
};

impl ChecklistTable {
    fn columns(&self) -> String {
        format!(
            "id, {} AS parent_id, position, title, completed, created_at",
            self.parent_column
        )
    }

    /// Lock the parent row until the transaction ends.
    ///
    /// Returns `false` if the parent does not exist.
    pub async fn lock_parent(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", self.parent_table);
        let row = sqlx::query_scalar::<_, DbId>(&query)
            .bind(parent_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    /// Append an item after the parent's current last item.
    pub async fn append(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        item: &NewChecklistItem,
    ) -> Result<DbId, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} ({parent}, position, title, completed)
             SELECT $1, COALESCE(MAX(position), -1) + 1, $2, $3
             FROM {table} WHERE {parent} = $1
             RETURNING id",
            table = self.table,
            parent = self.parent_column,
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(parent_id)
            .bind(&item.title)
            .bind(item.completed)
            .fetch_one(&mut *conn)
            .await
    }

    /// Update an item of the given parent. Only non-`None` fields are applied.
    ///
    /// Returns `false` if the parent has no item with that id.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        item_id: DbId,
        input: &UpdateChecklistItem,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET
                title = COALESCE($3, title),
                completed = COALESCE($4, completed)
             WHERE id = $1 AND {parent} = $2",
            table = self.table,
            parent = self.parent_column,
        );
        let result = sqlx::query(&query)
            .bind(item_id)
            .bind(parent_id)
            .bind(&input.title)
            .bind(input.completed)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one item by id. Siblings keep their positions and ids.
    ///
    /// Returns `false` if the parent has no item with that id.
    pub async fn delete(
        &self,
        conn: &mut PgConnection,
        parent_id: DbId,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {table} WHERE id = $1 AND {parent} = $2",
            table = self.table,
            parent = self.parent_column,
        );
        let result = sqlx::query(&query)
            .bind(item_id)
            .bind(parent_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the items of all given parents, grouped by parent id and ordered
    /// by position.
    pub async fn load_for(
        &self,
        conn: &mut PgConnection,
        parent_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ChecklistItem>>, sqlx::Error> {
        let mut grouped: HashMap<DbId, Vec<ChecklistItem>> = HashMap::new();
        if parent_ids.is_empty() {
            return Ok(grouped);
        }

        let query = format!(
            "SELECT {columns} FROM {table}
             WHERE {parent} = ANY($1)
             ORDER BY {parent}, position, id",
            columns = self.columns(),
            table = self.table,
            parent = self.parent_column,
        );
        let items = sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(parent_ids)
            .fetch_all(&mut *conn)
            .await?;

        for item in items {
            grouped.entry(item.parent_id).or_default().push(item);
        }
        Ok(grouped)
    }
}
