use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{normalize_email, UserCreate, UserResponse, UserUpdate};
use super::repo::{NewUser, User};
use crate::{
    auth::password::hash_password, error::AppError, pagination::Pagination, state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.email = normalize_email(&payload.email);
    payload.validate()?;

    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already exists");
        return Err(AppError::Conflict("username"));
    }
    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already exists");
        return Err(AppError::Conflict("email"));
    }

    let hashed_password = hash_password(&payload.password)?;
    let user = User::insert(
        &state.db,
        &NewUser {
            username: payload.username,
            email: payload.email,
            full_name: payload.full_name,
            hashed_password,
            is_active: payload.is_active,
        },
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = User::list(&state.db, p.limit, p.skip).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UserUpdate>,
) -> Result<Json<UserResponse>, AppError> {
    if let Some(email) = payload.email.as_mut() {
        *email = normalize_email(email);
    }
    payload.validate()?;

    let mut user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    // Nothing supplied: return the row as is, without touching updated_at.
    if payload.is_empty() {
        return Ok(Json(user.into()));
    }

    payload.apply(&mut user);
    if let Some(password) = &payload.password {
        user.hashed_password = hash_password(password)?;
    }

    let user = User::update(&state.db, &user).await?;
    info!(user_id = %user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !User::delete(&state.db, id).await? {
        return Err(AppError::NotFound("user"));
    }
    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
