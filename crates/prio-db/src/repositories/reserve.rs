//! PostgreSQL implementation of ReserveRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use prio_core::entities::HardReserveEntry;
use prio_core::error::DomainError;
use prio_core::traits::{RepoResult, ReserveRepository};

use crate::models::HardReserveModel;

use super::error::{map_db_error, map_unique_violation, reserve_not_found};

/// PostgreSQL implementation of ReserveRepository.
///
/// Item-name uniqueness is case-insensitive, backed by a unique index on
/// `lower(trim(item_name))`.
#[derive(Clone)]
pub struct PgReserveRepository {
    pool: PgPool,
}

impl PgReserveRepository {
    /// Create a new PgReserveRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReserveRepository for PgReserveRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<HardReserveEntry>> {
        let result = sqlx::query_as::<_, HardReserveModel>(
            r#"
            SELECT id, item_name, note, created_at
            FROM hard_reserves
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(HardReserveEntry::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<HardReserveEntry>> {
        let results = sqlx::query_as::<_, HardReserveModel>(
            r#"
            SELECT id, item_name, note, created_at
            FROM hard_reserves
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(HardReserveEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, normalized_name: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM hard_reserves WHERE lower(trim(item_name)) = $1
            )
            "#,
        )
        .bind(normalized_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, entry), fields(item = %entry.item_name))]
    async fn create(&self, entry: &HardReserveEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO hard_reserves (id, item_name, note, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.item_name)
        .bind(&entry.note)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ReserveAlreadyExists {
                item: entry.item_name.clone(),
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, entry), fields(id = %entry.id))]
    async fn update(&self, entry: &HardReserveEntry) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE hard_reserves
            SET item_name = $2, note = $3
            WHERE id = $1
            "#,
        )
        .bind(entry.id)
        .bind(&entry.item_name)
        .bind(&entry.note)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ReserveAlreadyExists {
                item: entry.item_name.clone(),
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(reserve_not_found(entry.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM hard_reserves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(reserve_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReserveRepository>();
    }
}
