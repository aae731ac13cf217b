use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, bills::bills_handler, dashboard::dashboard_handler,
        maintenance::maintenance_handler, payments::payments_handler, tenants::tenants_handler,
        units::units_handler, users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/units", units_handler().layer(middleware::from_fn(auth)))
        .nest("/tenants", tenants_handler().layer(middleware::from_fn(auth)))
        .nest("/bills", bills_handler().layer(middleware::from_fn(auth)))
        .nest("/payments", payments_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/maintenance",
            maintenance_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/dashboard",
            dashboard_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new().nest("/api", api_route)
}
