//! # Category Repository
//!
//! Category CRUD plus the find-or-create resolution used by product
//! writes: the client sends a category *name*, and an unknown name
//! creates the category on the fly.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pos_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Creates a category with the given name.
    ///
    /// Fails with [`DbError::UniqueViolation`] on a duplicate name.
    pub async fn create(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Creating category");

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await?;

        Ok(category)
    }

    /// Renames a category.
    pub async fn rename(&self, id: &str, name: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE categories SET name = ?2 WHERE id = ?1")
            .bind(id)
            .bind(name.trim())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Deletes a category. Products referencing it fall back to NULL via
    /// ON DELETE SET NULL.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

/// Resolves a category name to its id, creating the category if the name
/// is unseen.
///
/// Takes a bare connection so product writes can run it inside their own
/// transaction.
pub(crate) async fn find_or_create_category(
    conn: &mut SqliteConnection,
    name: &str,
) -> DbResult<String> {
    let name = name.trim();

    let existing: Option<String> =
        sqlx::query_scalar("SELECT id FROM categories WHERE name = ?1 LIMIT 1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id = Uuid::new_v4().to_string();
    debug!(name = %name, id = %id, "Creating category implicitly");

    sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(&id)
        .bind(name)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

    Ok(id)
}
