use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_users::{PostgresUserRepository, UserService, handlers};

/// Users routes on PostgreSQL, behind the bearer gate unless
/// `AUTH_REQUIRED=false`.
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PostgresUserRepository::new(state.db.clone());
    let routes = handlers::router(UserService::new(repository));

    if state.config.auth_required {
        routes.layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            jwt_auth_middleware,
        ))
    } else {
        tracing::warn!("AUTH_REQUIRED=false: /api/users is served without authentication");
        routes
    }
}
