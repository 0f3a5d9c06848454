//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::services::auth as auth_service;
use crate::AppState;

/// Cookie holding the session token when no Authorization header is sent.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user extracted from a JWT session token.
///
/// The raw token is kept so upstream calls run with the caller's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub token: String,
}

impl CurrentUser {
    fn from_parts(parts: &Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(SESSION_COOKIE)
                    .map(|c| c.value().to_string())
            })
            .ok_or(AppError::Unauthorized)?;

        let claims = auth_service::validate_token(&token, &state.config.jwt_secret)?;

        if claims.token_type != "access" {
            return Err(AppError::Unauthorized);
        }

        Ok(CurrentUser {
            user_id: claims.user_id,
            username: claims.sub,
            role: claims.role,
            token,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        CurrentUser::from_parts(parts, state)
    }
}

/// Optional session: never rejects, so page handlers can redirect instead.
#[derive(Debug, Clone)]
pub struct Session(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_parts(parts, state) {
            Ok(user) => Ok(Session(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "No valid session on request");
                Ok(Session(None))
            }
        }
    }
}
