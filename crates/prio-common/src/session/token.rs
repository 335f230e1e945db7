//! Session token verification
//!
//! The identity provider (the guild's OAuth front door) mints session tokens
//! after a successful login; this service only verifies them and exposes the
//! embedded profile. An absent or invalid token degrades to an anonymous
//! actor at the call site, it is not an error by itself.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use prio_core::Actor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Session claims carried by the identity provider's token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Display name from the provider profile
    pub name: String,
    /// Avatar URL, if the profile has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Officer flag from the guild profile
    #[serde(default)]
    pub officer: bool,
}

impl SessionClaims {
    /// Get the user ID as a Uuid
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.sub.parse::<Uuid>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Build the request-scoped actor from these claims
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid UUID
    pub fn actor(&self) -> Result<Actor, AppError> {
        Ok(Actor::authenticated(
            self.user_id()?,
            self.name.clone(),
            self.officer,
        ))
    }
}

/// Verifies session tokens and, for tests and local tooling, mints them
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    max_age: i64,
}

impl SessionService {
    /// Create a new session service with the shared secret
    #[must_use]
    pub fn new(secret: &str, max_age: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            max_age,
        }
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::SessionExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Mint a session token for a profile. The identity provider does this
    /// in production; the service keeps the ability for tests and tooling.
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(
        &self,
        user_id: Uuid,
        name: &str,
        avatar: Option<String>,
        officer: bool,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.max_age)).timestamp(),
            name: name.to_string(),
            avatar,
            officer,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new("test-secret-value", 3600)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "Thrall", None, false).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.name, "Thrall");
        assert!(!claims.officer);
    }

    #[test]
    fn test_officer_flag_becomes_officer_actor() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service
            .issue(user_id, "Jaina", Some("https://cdn/avatar.png".to_string()), true)
            .unwrap();
        let actor = service.verify(&token).unwrap().actor().unwrap();

        assert!(actor.is_officer());
        assert_eq!(actor.user_id(), Some(user_id));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = service();
        assert!(matches!(
            service.verify("not-a-token").unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = service();
        let other = SessionService::new("different-secret", 3600);
        let token = service
            .issue(Uuid::new_v4(), "Thrall", None, false)
            .unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_bad_subject_fails_actor_conversion() {
        let claims = SessionClaims {
            sub: "not-a-uuid".to_string(),
            iat: 0,
            exp: i64::MAX,
            name: "x".to_string(),
            avatar: None,
            officer: false,
        };
        assert!(claims.actor().is_err());
    }
}
