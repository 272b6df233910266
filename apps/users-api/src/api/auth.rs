use axum::Router;
use domain_users::{AuthService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = AuthService::new(state.config.credentials.clone(), state.jwt.clone());
    handlers::auth_router(service)
}
