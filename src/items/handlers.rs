use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{ItemCreate, ItemResponse, ItemUpdate};
use super::repo::{Item, NewItem};
use crate::{error::AppError, pagination::Pagination, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemCreate>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    payload.validate()?;

    let item = Item::insert(
        &state.db,
        &NewItem {
            title: payload.title,
            description: payload.description,
            price: payload.price,
            is_active: payload.is_active,
        },
    )
    .await?;

    info!(item_id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = Item::list(&state.db, p.limit, p.skip).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = Item::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("item"))?;
    Ok(Json(item.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<ItemResponse>, AppError> {
    payload.validate()?;

    let mut item = Item::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("item"))?;

    if payload.is_empty() {
        return Ok(Json(item.into()));
    }

    payload.apply(&mut item);
    let item = Item::update(&state.db, &item).await?;
    info!(item_id = %item.id, "item updated");
    Ok(Json(item.into()))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !Item::delete(&state.db, id).await? {
        return Err(AppError::NotFound("item"));
    }
    info!(item_id = %id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
