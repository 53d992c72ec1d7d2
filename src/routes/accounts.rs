use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::models::{AccountSettingsRequest, AuthResponse, HealthResponse, LoginRequest, RegisterRequest, User};
use crate::routes::{error_response, storage_error, validation_error, AppState, Viewer};
use crate::services::{hash_password, AuthError, NewAccount};

/// Configure health and account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/auth/register", web::post().to(register))
        .route("/auth/login", web::post().to(login))
        .route("/profile/account", web::put().to(account_settings));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy {
        "healthy"
    } else {
        tracing::warn!("Health check: PostgreSQL unreachable");
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

fn token_response(state: &AppState, user: User, status: StatusCode) -> HttpResponse {
    match state.auth.issue_token(user.id) {
        Ok(token) => HttpResponse::build(status).json(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: state.auth.token_ttl_secs(),
            user,
        }),
        Err(e) => {
            tracing::error!("Failed to issue token for {}: {}", user.id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token", e.to_string())
        }
    }
}

/// Register endpoint
///
/// POST /api/v1/auth/register
///
/// Creates the account and its profile together, then logs the new user in.
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for register request: {:?}", errors);
        return validation_error(errors);
    }

    let password_hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create account", e.to_string());
        }
    };

    let account = NewAccount {
        username: req.username.clone(),
        email: req.email.clone(),
        password_hash,
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        sex: req.sex,
        date_of_birth: Some(req.date_of_birth),
    };

    let user = match state.postgres.create_account(&account, Utc::now().date_naive()).await {
        Ok(user) => user,
        Err(e) => return storage_error("Failed to create account", e),
    };

    tracing::info!("Registered user {} ({})", user.id, user.username);

    token_response(&state, user, StatusCode::CREATED)
}

/// Login endpoint
///
/// POST /api/v1/auth/login
///
/// Request body:
/// ```json
/// {
///   "login": "e-mail or username",
///   "password": "string"
/// }
/// ```
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let credentials = match state.postgres.find_credentials(req.login.trim()).await {
        Ok(credentials) => credentials,
        Err(e) => return storage_error("Failed to log in", e),
    };

    match state.auth.authenticate(credentials, &req.password) {
        Ok(user) => {
            tracing::info!("User {} logged in", user.id);
            token_response(&state, user, StatusCode::OK)
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Failed login attempt");
            error_response(StatusCode::UNAUTHORIZED, "Invalid credentials", AuthError::InvalidCredentials.to_string())
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to log in", e.to_string())
        }
    }
}

/// Account settings endpoint
///
/// PUT /api/v1/profile/account
///
/// Saving the account recomputes the stored profile age. Sending
/// `password` and `password_confirmation` also changes the password.
async fn account_settings(
    state: web::Data<AppState>,
    viewer: Viewer,
    req: web::Json<AccountSettingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let password_hash = match req.password.as_deref().map(hash_password).transpose() {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update account", e.to_string());
        }
    };

    match state
        .postgres
        .update_account(viewer.id, &req, password_hash.as_deref(), Utc::now().date_naive())
        .await
    {
        Ok(user) => {
            tracing::info!("Updated account {} (password changed: {})", user.id, password_hash.is_some());
            HttpResponse::Ok().json(user)
        }
        Err(e) => storage_error("Failed to update account", e),
    }
}
