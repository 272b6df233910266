use axum::Router;

pub mod auth;
pub mod health;
pub mod users;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state)) // Auth routes at /api/auth
        .nest("/users", users::router(state))
}

/// Router with `/ready`, checking the database.
///
/// Handed to `create_router` together with `/health`, so the probes share
/// the tracing and header layers.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
