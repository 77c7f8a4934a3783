use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub user_id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

impl Claims {
    pub fn is_expired(&self) -> bool {
        (self.exp as i64) <= Utc::now().timestamp()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Not logged in")]
    MissingToken,
    #[error("Token is malformed")]
    Malformed,
    #[error("Token expired")]
    TokenExpired,
    #[error("Admin access required")]
    NotAdmin,
}

/// Bearer token shared by every clone of an `ApiClient`.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }

    pub fn claims(&self) -> Result<Claims, AuthError> {
        let token = self.token().ok_or(AuthError::MissingToken)?;
        let claims = decode_claims(&token)?;
        if claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }

    pub fn require_user(&self) -> Result<Claims, AuthError> {
        self.claims()
    }

    pub fn require_admin(&self) -> Result<Claims, AuthError> {
        let claims = self.claims()?;
        if !claims.admin {
            return Err(AuthError::NotAdmin);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Reads the payload without checking the signature; the secret lives on the server.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::Malformed)
}
