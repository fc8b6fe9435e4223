use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use super::{
    ApiError, ApiJson, ApiResponse, AppState, AuthResponse, MessageResponse, SessionUser,
};
use crate::constants::session::USER_ID_KEY;
use crate::models::{NewUser, User};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Any `role` the client sends is ignored.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mobile: String,
}

/// Resolves the session cookie to a stored account.
pub async fn current_user(state: &AppState, session: &Session) -> Result<User, ApiError> {
    let user_id = session
        .get::<String>(USER_ID_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read session: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

    state
        .store
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Session user no longer exists".to_string()))
}

/// Admin gate for content management routes. The role is read from the store
/// on every request.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = current_user(&state, &session).await?;
    tracing::Span::current().record("user_id", &user.id);

    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Username and password required"));
    }

    let user = state
        .store
        .get_user_by_username(&payload.username)
        .await?
        .filter(|user| user.password == payload.password)
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    session
        .insert(USER_ID_KEY, &user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(ApiResponse::success(AuthResponse {
        user: user.into(),
    })))
}

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let username = payload.username.trim();
    let mobile = payload.mobile.trim();

    if username.is_empty() || payload.password.is_empty() || mobile.is_empty() {
        return Err(ApiError::validation(
            "Username, password and mobile number are required",
        ));
    }

    if state.store.get_user_by_username(username).await?.is_some() {
        return Err(ApiError::conflict("Username already exists"));
    }

    if state.store.get_user_by_mobile(mobile).await?.is_some() {
        return Err(ApiError::conflict("Mobile number already registered"));
    }

    let user = state
        .store
        .create_user(NewUser {
            username: username.to_string(),
            password: payload.password,
            mobile: mobile.to_string(),
            role: None,
        })
        .await?;

    Ok(Json(ApiResponse::success(AuthResponse {
        user: user.into(),
    })))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to end session: {e}")))?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Logged out",
    ))))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<SessionUser>>, ApiError> {
    let user = current_user(&state, &session).await?;
    Ok(Json(ApiResponse::success(user.into())))
}
