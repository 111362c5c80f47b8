//! Admin Analytics API

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::menu::repository::MenuRepository;
use crate::payment::repository::PaymentRepository;
use crate::shared::error::BistroError;
use crate::shared::middleware::AdminOnly;
use crate::stats::repository::{CategoryStat, StatsRepository};
use crate::user::repository::UserRepository;

/// Analytics service state
#[derive(Clone)]
pub struct StatsState {
    pub user_repo: Arc<UserRepository>,
    pub menu_repo: Arc<MenuRepository>,
    pub payment_repo: Arc<PaymentRepository>,
    pub stats_repo: Arc<StatsRepository>,
}

/// Dashboard headline numbers
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsResponse {
    pub users: u64,
    pub menu_items: u64,
    pub orders: u64,
    pub revenue: f64,
}

/// Dashboard headline numbers (admin)
///
/// Counts are estimates from collection metadata; revenue is an exact sum
/// over recorded payments.
#[utoipa::path(
    get,
    path = "/order-stats",
    tag = "stats",
    operation_id = "orderStats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Headline numbers", body = OrderStatsResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn order_stats(
    AdminOnly(_claims): AdminOnly,
    State(state): State<StatsState>,
) -> Result<Json<OrderStatsResponse>, BistroError> {
    let users = state.user_repo.estimated_count().await?;
    let menu_items = state.menu_repo.estimated_count().await?;
    let orders = state.payment_repo.estimated_count().await?;
    let revenue = state.stats_repo.total_revenue().await?;

    Ok(Json(OrderStatsResponse {
        users,
        menu_items,
        orders,
        revenue,
    }))
}

/// Sales per menu category (admin)
#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "stats",
    operation_id = "adminStats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Per-category sales", body = [CategoryStat]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn admin_stats(
    AdminOnly(_claims): AdminOnly,
    State(state): State<StatsState>,
) -> Result<Json<Vec<CategoryStat>>, BistroError> {
    let breakdown = state.stats_repo.category_breakdown().await?;
    Ok(Json(breakdown))
}

/// Create the analytics router (mounted at the API root)
pub fn stats_router(state: StatsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(order_stats))
        .routes(routes!(admin_stats))
        .with_state(state)
}
