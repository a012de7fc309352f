//! Route definitions for the RainTrack API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - project management
        .nest("/projects", project_routes())
        // Protected routes - warranty claims
        .nest("/claims", claim_routes())
        // Protected routes - portfolio statistics
        .nest("/portfolio", portfolio_routes())
        // Protected routes - peril overview
        .nest("/perils", peril_routes())
        // Protected routes - weather provider
        .nest("/weather", weather_routes())
}

/// Authentication routes (login/register public, profile protected)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// Project management routes (protected)
fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/:project_id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/:project_id/evaluation",
            get(handlers::get_project_evaluation),
        )
        .route(
            "/:project_id/rainfall",
            get(handlers::list_readings).post(handlers::record_reading),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Warranty claim routes (protected)
fn claim_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_claims).post(handlers::submit_claim))
        .route("/:claim_id", get(handlers::get_claim))
        .route("/:claim_id/approve", post(handlers::approve_claim))
        .route("/:claim_id/reject", post(handlers::reject_claim))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Portfolio statistics routes (protected)
fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/report.csv", get(handlers::export_report))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Peril overview routes (protected)
fn peril_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_perils))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Weather provider routes (protected)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::get_forecast))
        .route_layer(middleware::from_fn(auth_middleware))
}
