//! Cart API

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::cart::entity::{CartLine, CartLineInput};
use crate::cart::repository::CartRepository;
use crate::shared::api_common::{DeleteResponse, InsertResponse};
use crate::shared::error::BistroError;

/// Cart service state
#[derive(Clone)]
pub struct CartState {
    pub cart_repo: Arc<CartRepository>,
}

/// Cart listing filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct CartQuery {
    /// Owner email; without it the cart listing is empty
    pub email: Option<String>,
}

/// List a customer's cart
#[utoipa::path(
    get,
    path = "",
    tag = "cart",
    operation_id = "listCart",
    params(CartQuery),
    responses(
        (status = 200, description = "Cart lines for the email", body = [CartLine])
    )
)]
pub async fn list_cart(
    State(state): State<CartState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartLine>>, BistroError> {
    let lines = match query.email {
        Some(ref email) if !email.is_empty() => state.cart_repo.find_by_email(email).await?,
        _ => Vec::new(),
    };
    Ok(Json(lines))
}

/// Add a dish to a cart
#[utoipa::path(
    post,
    path = "",
    tag = "cart",
    operation_id = "addToCart",
    request_body = CartLineInput,
    responses(
        (status = 200, description = "Line added", body = InsertResponse),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn add_to_cart(
    State(state): State<CartState>,
    Json(input): Json<CartLineInput>,
) -> Result<Json<InsertResponse>, BistroError> {
    if input.email.is_empty() {
        return Err(BistroError::validation("email must not be empty"));
    }

    let line = CartLine::from_input(input);
    state.cart_repo.insert(&line).await?;
    info!(line_id = %line.id, email = %line.email, "Cart line added");

    Ok(Json(InsertResponse::new(line.id)))
}

/// Remove a line from a cart
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "cart",
    operation_id = "removeFromCart",
    params(("id" = String, Path, description = "Cart line ID")),
    responses(
        (status = 200, description = "Delete count", body = DeleteResponse)
    )
)]
pub async fn remove_from_cart(
    State(state): State<CartState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, BistroError> {
    let deleted = state.cart_repo.delete(&id).await?;
    Ok(Json(DeleteResponse { deleted_count: deleted }))
}

/// Create the cart router
pub fn cart_router(state: CartState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_cart, add_to_cart))
        .routes(routes!(remove_from_cart))
        .with_state(state)
}
