//! PostgreSQL implementation of RequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use prio_core::entities::LootRequest;
use prio_core::traits::{RepoResult, RequestFilter, RequestRepository};

use crate::models::LootRequestModel;

use super::error::{map_db_error, request_not_found};

/// PostgreSQL implementation of RequestRepository
#[derive(Clone)]
pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    /// Create a new PgRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<LootRequest>> {
        let result = sqlx::query_as::<_, LootRequestModel>(
            r#"
            SELECT id, user_id, discord_name, character_name, class, raid, item_name, slot,
                   priority, user_note, admin_note, status, reviewed_by, locked, created_at
            FROM loot_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(LootRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<LootRequest>> {
        let results = sqlx::query_as::<_, LootRequestModel>(
            r#"
            SELECT id, user_id, discord_name, character_name, class, raid, item_name, slot,
                   priority, user_note, admin_note, status, reviewed_by, locked, created_at
            FROM loot_requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(LootRequest::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: RequestFilter) -> RepoResult<Vec<LootRequest>> {
        let results = sqlx::query_as::<_, LootRequestModel>(
            r#"
            SELECT id, user_id, discord_name, character_name, class, raid, item_name, slot,
                   priority, user_note, admin_note, status, reviewed_by, locked, created_at
            FROM loot_requests
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR raid = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status.map(|s| s.as_str().to_string()))
        .bind(filter.raid)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(LootRequest::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_decided(&self) -> RepoResult<Vec<LootRequest>> {
        let results = sqlx::query_as::<_, LootRequestModel>(
            r#"
            SELECT id, user_id, discord_name, character_name, class, raid, item_name, slot,
                   priority, user_note, admin_note, status, reviewed_by, locked, created_at
            FROM loot_requests
            WHERE status IN ('approved', 'rejected')
            ORDER BY raid ASC, item_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(LootRequest::try_from).collect()
    }

    #[instrument(skip(self, requests), fields(count = requests.len()))]
    async fn insert_batch(&self, requests: &[LootRequest]) -> RepoResult<()> {
        // One transaction for the whole submission; a failure on any row
        // rolls back every row (no partial inserts).
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for request in requests {
            sqlx::query(
                r#"
                INSERT INTO loot_requests (id, user_id, discord_name, character_name, class, raid,
                                           item_name, slot, priority, user_note, admin_note,
                                           status, reviewed_by, locked, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(request.id)
            .bind(request.user_id)
            .bind(&request.discord_name)
            .bind(&request.character_name)
            .bind(&request.class)
            .bind(&request.raid)
            .bind(&request.item_name)
            .bind(&request.slot)
            .bind(request.priority.as_str())
            .bind(&request.user_note)
            .bind(&request.admin_note)
            .bind(request.status.as_str())
            .bind(&request.reviewed_by)
            .bind(request.locked)
            .bind(request.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, request), fields(id = %request.id))]
    async fn update(&self, request: &LootRequest) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE loot_requests
            SET raid = $2, item_name = $3, slot = $4, priority = $5, user_note = $6,
                admin_note = $7, status = $8, reviewed_by = $9, locked = $10
            WHERE id = $1
            "#,
        )
        .bind(request.id)
        .bind(&request.raid)
        .bind(&request.item_name)
        .bind(&request.slot)
        .bind(request.priority.as_str())
        .bind(&request.user_note)
        .bind(&request.admin_note)
        .bind(request.status.as_str())
        .bind(&request.reviewed_by)
        .bind(request.locked)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(request_not_found(request.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM loot_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(request_not_found(id));
        }

        Ok(())
    }
}
