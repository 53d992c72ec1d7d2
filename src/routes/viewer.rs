use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::routes::{AppState, JsonError};
use crate::services::AuthError;

/// The authenticated user making the request
///
/// Extracted from an `Authorization: Bearer <token>` header; handlers that
/// take a `Viewer` reject anonymous requests with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: i64,
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req).map_err(Into::into))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: String) -> JsonError {
    JsonError {
        error: "unauthorized".to_string(),
        message,
        status_code: 401,
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<Viewer, JsonError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| JsonError {
        error: "internal".to_string(),
        message: "application state not configured".to_string(),
        status_code: 500,
    })?;

    let token = bearer_token(req).ok_or_else(|| unauthorized(AuthError::MissingToken.to_string()))?;

    let id = state.auth.validate_token(token).map_err(|e| {
        tracing::debug!("Rejected token on {}: {}", req.path(), e);
        unauthorized(e.to_string())
    })?;

    Ok(Viewer { id })
}
