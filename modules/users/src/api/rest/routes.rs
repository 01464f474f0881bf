use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the users REST surface and attach the service as an extension.
/// The composition root builds the service once and hands it over here.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/api/v1/users",
            post(handlers::upsert_user).get(handlers::list_users),
        )
        .route(
            "/api/v1/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .layer(Extension(service))
}
