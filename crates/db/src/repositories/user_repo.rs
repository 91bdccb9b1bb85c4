//! Read-only access to the `users` table, which the identity service owns.

use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::UserNameRow;

pub struct UserRepo;

impl UserRepo {
    /// Fetch display names for a set of user ids.
    pub async fn find_names(pool: &PgPool, ids: &[DbId]) -> Result<Vec<UserNameRow>, sqlx::Error> {
        sqlx::query_as::<_, UserNameRow>("SELECT id, username FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
