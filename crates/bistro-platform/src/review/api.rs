//! Reviews API

use axum::{extract::State, Json};
use std::sync::Arc;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::review::entity::Review;
use crate::review::repository::ReviewRepository;
use crate::shared::error::BistroError;

/// Review service state
#[derive(Clone)]
pub struct ReviewState {
    pub review_repo: Arc<ReviewRepository>,
}

/// List customer reviews
#[utoipa::path(
    get,
    path = "",
    tag = "reviews",
    operation_id = "listReviews",
    responses(
        (status = 200, description = "All reviews", body = [Review])
    )
)]
pub async fn list_reviews(
    State(state): State<ReviewState>,
) -> Result<Json<Vec<Review>>, BistroError> {
    let reviews = state.review_repo.find_all().await?;
    Ok(Json(reviews))
}

/// Create the reviews router
pub fn reviews_router(state: ReviewState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_reviews))
        .with_state(state)
}
