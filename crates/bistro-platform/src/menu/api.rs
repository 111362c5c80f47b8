//! Menu API
//!
//! The catalogue is public to read; creating and deleting dishes is an
//! admin operation. Editing stays open so the kitchen tablet can push
//! price corrections without a privileged session.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::menu::entity::{MenuItem, MenuItemInput};
use crate::menu::repository::MenuRepository;
use crate::shared::api_common::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::shared::error::BistroError;
use crate::shared::middleware::AdminOnly;

/// Menu service state
#[derive(Clone)]
pub struct MenuState {
    pub menu_repo: Arc<MenuRepository>,
}

/// List the menu
#[utoipa::path(
    get,
    path = "",
    tag = "menu",
    operation_id = "listMenu",
    responses(
        (status = 200, description = "All menu items", body = [MenuItem])
    )
)]
pub async fn list_menu(
    State(state): State<MenuState>,
) -> Result<Json<Vec<MenuItem>>, BistroError> {
    let items = state.menu_repo.find_all().await?;
    Ok(Json(items))
}

/// Get a single dish
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "menu",
    operation_id = "getMenuItem",
    params(("id" = String, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "The dish", body = MenuItem),
        (status = 404, description = "No such dish")
    )
)]
pub async fn get_menu_item(
    State(state): State<MenuState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>, BistroError> {
    let item = state
        .menu_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| BistroError::not_found("MenuItem", &id))?;
    Ok(Json(item))
}

/// Add a dish (admin)
#[utoipa::path(
    post,
    path = "",
    tag = "menu",
    operation_id = "addMenuItem",
    security(("bearer_auth" = [])),
    request_body = MenuItemInput,
    responses(
        (status = 200, description = "Dish created", body = InsertResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn add_menu_item(
    AdminOnly(_claims): AdminOnly,
    State(state): State<MenuState>,
    Json(input): Json<MenuItemInput>,
) -> Result<Json<InsertResponse>, BistroError> {
    if input.name.is_empty() {
        return Err(BistroError::validation("name must not be empty"));
    }

    let item = MenuItem::from_input(input);
    state.menu_repo.insert(&item).await?;
    info!(item_id = %item.id, name = %item.name, "Menu item added");

    Ok(Json(InsertResponse::new(item.id)))
}

/// Edit a dish
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "menu",
    operation_id = "updateMenuItem",
    params(("id" = String, Path, description = "Menu item ID")),
    request_body = MenuItemInput,
    responses(
        (status = 200, description = "Update counts", body = UpdateResponse)
    )
)]
pub async fn update_menu_item(
    State(state): State<MenuState>,
    Path(id): Path<String>,
    Json(input): Json<MenuItemInput>,
) -> Result<Json<UpdateResponse>, BistroError> {
    let (matched, modified) = state.menu_repo.update(&id, &input).await?;
    Ok(Json(UpdateResponse {
        matched_count: matched,
        modified_count: modified,
    }))
}

/// Remove a dish (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "menu",
    operation_id = "deleteMenuItem",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Delete count", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn delete_menu_item(
    AdminOnly(_claims): AdminOnly,
    State(state): State<MenuState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, BistroError> {
    let deleted = state.menu_repo.delete(&id).await?;
    if deleted > 0 {
        info!(item_id = %id, "Menu item deleted");
    }
    Ok(Json(DeleteResponse { deleted_count: deleted }))
}

/// Create the menu router
pub fn menu_router(state: MenuState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_menu, add_menu_item))
        .routes(routes!(get_menu_item, update_menu_item, delete_menu_item))
        .with_state(state)
}
