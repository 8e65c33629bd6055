//! Wallet profile sync - durable identity records keyed by wallet address
//!
//! Called after successful signature verification. Guarantees exactly one
//! `users` row and one `wallet_profiles` row per wallet address, safe under
//! concurrent first-logins from the same wallet.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile sync service backed by Postgres.
pub struct ProfileService {
    db_pool: PgPool,
}

impl ProfileService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Ensures a user and wallet profile row exist for this wallet, returning
    /// the backing user id.
    ///
    /// Idempotent: `ON CONFLICT (wallet_address)` on both tables means two
    /// racing first-logins converge on one identity, with the loser of the
    /// insert race resolving the winner's row instead of erroring. A routine
    /// login without a display name never clears a stored one.
    pub async fn sync_wallet_profile(
        &self,
        wallet_address: &str,
        display_name: Option<&str>,
    ) -> Result<Uuid> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, wallet_address, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT (wallet_address) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(wallet_address)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .context("Failed to insert user for wallet")?;

        // Read back whichever insert won; the row is guaranteed to exist now.
        let (user_id,): (Uuid,) =
            sqlx::query_as("SELECT id FROM users WHERE wallet_address = $1")
                .bind(wallet_address)
                .fetch_one(&self.db_pool)
                .await
                .context("User row missing after insert-or-conflict")?;

        let display_name = display_name.map(str::trim).filter(|name| !name.is_empty());

        sqlx::query(
            r#"
            INSERT INTO wallet_profiles (user_id, wallet_address, display_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (wallet_address) DO UPDATE
            SET display_name = COALESCE(EXCLUDED.display_name, wallet_profiles.display_name),
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(wallet_address)
        .bind(display_name)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .context("Failed to upsert wallet profile")?;

        Ok(user_id)
    }
}
