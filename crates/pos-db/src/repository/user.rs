//! # User Repository
//!
//! Cashier/manager account lookup. Read-only from the checkout's
//! perspective: a sale resolves its cashier by username, best effort.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::DbResult;
use pos_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Finds a user by exact username match. First match wins; the schema
    /// does not enforce uniqueness.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, created_at FROM users WHERE username = ?1 LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Placeholder credential check: exact username + password + role
    /// match, plain text, as in the legacy system. Returns the user on
    /// success, None on any mismatch (the caller must not learn which
    /// field was wrong).
    pub async fn verify_login(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, created_at \
             FROM users WHERE username = ?1 AND password = ?2 AND role = ?3 LIMIT 1",
        )
        .bind(username)
        .bind(password)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Resolves a username to a user id. A miss is not an error; the sale
/// proceeds with a NULL cashier reference.
///
/// Runs on a bare connection so checkout can call it inside its
/// transaction.
pub(crate) async fn resolve_user_id(
    conn: &mut SqliteConnection,
    username: &str,
) -> DbResult<Option<String>> {
    let id: Option<String> =
        sqlx::query_scalar("SELECT id FROM users WHERE username = ?1 LIMIT 1")
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(id)
}
