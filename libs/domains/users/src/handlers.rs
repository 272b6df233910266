use axum::{
    Extension, Json, Router,
    extract::{
        OriginalUri, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::JwtClaims;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth::{AuthService, CredentialVerifier};
use crate::error::{ErrorBody, UserResult};
use crate::models::{
    CreateUser, LoginRequest, LoginResponse, MessageResponse, UpdateUser, User,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USERS_TAG: &str = "users";
pub const AUTH_TAG: &str = "auth";

/// OpenAPI documentation for the users endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(User, CreateUser, UpdateUser, MessageResponse, ErrorBody)),
    tags((name = USERS_TAG, description = "User management endpoints"))
)]
pub struct ApiDoc;

/// OpenAPI documentation for the login endpoint
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(schemas(LoginRequest, LoginResponse, ErrorBody)),
    tags((name = AUTH_TAG, description = "Token issuance"))
)]
pub struct AuthApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Create the auth router (`POST /login`)
pub fn auth_router<C: CredentialVerifier + 'static>(service: AuthService<C>) -> Router {
    Router::new()
        .route("/login", post(login::<C>))
        .with_state(Arc::new(service))
}

/// Caller identity for logs; absent when the gate is disabled
fn caller(claims: &Option<Extension<JwtClaims>>) -> &str {
    claims
        .as_ref()
        .map(|Extension(claims)| claims.sub.as_str())
        .unwrap_or("anonymous")
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Storage fault", body = ErrorBody)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Storage fault", body = ErrorBody)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    OriginalUri(uri): OriginalUri,
    claims: Option<Extension<JwtClaims>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> UserResult<impl IntoResponse> {
    let Json(input) = payload?;
    tracing::debug!(caller = caller(&claims), "Create user requested");

    let user = service.create_user(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "ID is not an integer"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Storage fault", body = ErrorBody)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<i32>, PathRejection>,
) -> UserResult<Json<User>> {
    let Path(id) = path?;
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USERS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Storage fault", body = ErrorBody)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<i32>, PathRejection>,
    claims: Option<Extension<JwtClaims>>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> UserResult<Json<User>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    tracing::debug!(caller = caller(&claims), user_id = id, "Update user requested");

    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Storage fault", body = ErrorBody)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<i32>, PathRejection>,
    claims: Option<Extension<JwtClaims>>,
) -> UserResult<Json<MessageResponse>> {
    let Path(id) = path?;
    tracing::debug!(caller = caller(&claims), user_id = id, "Delete user requested");

    service.delete_user(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Successfully deleted user with ID: {}", id),
    }))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
async fn login<C: CredentialVerifier>(
    State(service): State<Arc<AuthService<C>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> UserResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let response = service.login(&request)?;
    Ok(Json(response))
}
