//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{user::CreateUser, User},
};

use super::CurrentUser;

/// List all users (ADMIN)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "User list", body = Vec<User>),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(&actor).await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    CurrentUser(_actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(&id).await?;
    Ok(Json(user))
}

/// Register a user (ADMIN)
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.users.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Lock a user account (ADMIN)
#[utoipa::path(
    post,
    path = "/users/{id}/lock",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User locked", body = User),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn lock_user(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.set_locked(&actor, &id, true).await?;
    Ok(Json(user))
}

/// Unlock a user account (ADMIN)
#[utoipa::path(
    post,
    path = "/users/{id}/unlock",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User unlocked", body = User),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn unlock_user(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.services.users.set_locked(&actor, &id, false).await?;
    Ok(Json(user))
}
