//! Batch view service
//!
//! Grouped read models over the core Batch Grouper: a member's own
//! submissions and the officer review board, each clustered into logical
//! submissions with a derived status.

use prio_core::traits::RequestFilter;
use prio_core::{group_requests, Actor};
use tracing::instrument;

use crate::dto::BatchResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Batch view service
pub struct BatchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BatchService<'a> {
    /// Create a new BatchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The acting member's own submissions, grouped, newest first
    #[instrument(skip(self))]
    pub async fn my_batches(&self, actor: &Actor) -> ServiceResult<Vec<BatchResponse>> {
        let user_id = actor
            .user_id()
            .ok_or_else(|| ServiceError::permission_denied("list own submissions"))?;

        let requests = self.ctx.request_repo().find_by_user(user_id).await?;
        let batches = group_requests(requests);

        Ok(batches.iter().map(BatchResponse::from).collect())
    }

    /// Every member's submissions grouped for the officer review board
    #[instrument(skip(self))]
    pub async fn review_board(&self, actor: &Actor) -> ServiceResult<Vec<BatchResponse>> {
        if !actor.is_officer() {
            return Err(ServiceError::permission_denied("view the review board"));
        }

        let requests = self
            .ctx
            .request_repo()
            .find_all(RequestFilter::default())
            .await?;
        let batches = group_requests(requests);

        Ok(batches.iter().map(BatchResponse::from).collect())
    }
}
