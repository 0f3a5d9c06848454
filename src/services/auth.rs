//! Session token validation.
//!
//! Tokens are issued by the authentication service; this crate only checks
//! them. [`issue_token`] exists for local tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JWT claims carried by session tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub role: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Sign an access token for `username`.
pub fn issue_token(
    username: &str,
    user_id: &str,
    role: &str,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        user_id: user_id.to_string(),
        role: role.to_string(),
        token_type: "access".to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}
