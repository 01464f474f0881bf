use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{ListUsersQuery, UpsertUserReq, UserDto, UserPageDto};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::contract::model::UpsertOutcome;
use crate::domain::service::Service;

/// Create a user (no id in the body) or update an existing one (id present).
/// Creation answers 201, update answers 200.
pub async fn upsert_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<UpsertUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    info!("Upserting user: {:?}", req);

    req.validate().map_err(ApiError::validation)?;

    match svc.upsert(req.into()).await {
        Ok(UpsertOutcome::Created(user)) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Ok(UpsertOutcome::Updated(user)) => Ok((StatusCode::OK, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to upsert user: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// List users matching the filter query, one page at a time
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserPageDto>, ApiError> {
    info!("Listing users with query: {:?}", query);

    let page = query.page_request().map_err(ApiError::validation)?;
    let (page_index, page_size) = (page.page, page.size);

    match svc.list(query.filter(), page).await {
        Ok(users) => Ok(Json(UserPageDto {
            users: users.into_iter().map(UserDto::from).collect(),
            page: page_index,
            size: page_size,
        })),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Get a specific user by id, including soft-deleted ones
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    info!("Getting user with id: {}", id);

    match svc.get(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Soft-delete a user by id
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("Soft-deleting user: {}", id);

    match svc.soft_delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to soft-delete user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}
