use crate::error::{AppError, AppResult};
use crate::middleware::auth::parse_user_id;
use crate::middleware::AuthUser;
use crate::models::UserModel;
use crate::response::ApiResponse;
use crate::services::auth::AuthService;
use anyhow::anyhow;
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Username (3-50 characters)
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Password (min 8 characters)
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// User password
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Session token
    pub token: String,
    /// User ID
    pub user_id: i32,
    /// Username
    pub username: String,
    /// User role
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID
    pub id: i32,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// User role (user, admin)
    pub role: String,
    /// Whether the account is banned
    pub is_banned: bool,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_banned: user.is_banned,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserCountResponse {
    /// Total registered accounts
    pub count: u64,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Username or email already exists", body = AppError),
    ),
    tag = "auth"
)]
pub async fn signup(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = AuthService::new(db);
    let (user, token) = service
        .signup(&payload.username, &payload.email, &payload.password)
        .await?;

    let response = AuthResponse {
        token: token.clone(),
        user_id: user.id,
        username: user.username,
        role: user.role,
    };

    let mut http_response = ApiResponse::ok(response).into_response();
    set_session_cookie(&mut http_response, &token)?;
    Ok(http_response)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 403, description = "Account banned", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    let (user, token) = service.login(&payload.email, &payload.password).await?;

    let response = AuthResponse {
        token: token.clone(),
        user_id: user.id,
        username: user.username,
        role: user.role,
    };

    let mut http_response = ApiResponse::ok(response).into_response();
    set_session_cookie(&mut http_response, &token)?;
    Ok(http_response)
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Logout successful", body = String),
    ),
    tag = "auth"
)]
pub async fn logout() -> AppResult<impl IntoResponse> {
    let mut response = ApiResponse::ok("Logout successful").into_response();
    clear_session_cookie(&mut response)?;
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("session_token" = [])),
    responses(
        (status = 200, description = "Current user retrieved successfully", body = UserResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn get_current_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_user_id(&auth_user)?;

    let service = AuthService::new(db);
    let user = service.get_user_by_id(user_id).await?;

    Ok(ApiResponse::ok(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/auth/count",
    responses(
        (status = 200, description = "Registered user count", body = UserCountResponse),
    ),
    tag = "auth"
)]
pub async fn user_count(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    let count = service.count_users().await?;
    Ok(ApiResponse::ok(UserCountResponse { count }))
}

fn set_session_cookie(response: &mut Response, token: &str) -> AppResult<()> {
    let cookie = crate::utils::cookie::build_session_cookie(
        token,
        crate::utils::jwt::session_expiry_seconds(),
    );
    append_set_cookie(response, &cookie)
}

fn clear_session_cookie(response: &mut Response) -> AppResult<()> {
    append_set_cookie(response, &crate::utils::cookie::build_clear_cookie())
}

fn append_set_cookie(response: &mut Response, cookie_value: &str) -> AppResult<()> {
    let value = HeaderValue::from_str(cookie_value).map_err(|e| {
        AppError::Internal(anyhow!("Failed to build Set-Cookie header value: {}", e))
    })?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}
