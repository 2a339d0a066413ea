// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! HS256 admin tokens

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tagbook_config::AuthConfig;
use uuid::Uuid;

use super::AuthError;

/// Claims embedded in every admin token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject (admin username)
    pub sub: String,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with one shared secret
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    lifetime_secs: u64,
}

impl TokenAuthority {
    pub fn new(secret: &[u8], issuer: impl Into<String>, lifetime_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            lifetime_secs,
        }
    }

    /// Build from config; an empty secret gets a random one for this process
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            tracing::warn!(
                target: "tagbook-api",
                "auth.jwt_secret is empty; using a random secret, tokens will not survive a restart"
            );
            format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
        } else {
            config.jwt_secret.clone()
        };
        Self::new(secret.as_bytes(), config.jwt_issuer.clone(), config.token_lifetime_secs)
    }

    pub fn issue(&self, subject: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.lifetime_secs as i64,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
    }

    /// Check signature, expiry and issuer
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        jsonwebtoken::decode::<AdminClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"an-unremarkable-test-secret-of-32b";

    #[test]
    fn test_issue_and_verify() {
        let authority = TokenAuthority::new(SECRET, "tagbook", 3600);
        let token = authority.issue("admin", "admin").unwrap();
        let claims = authority.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "tagbook");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_or_issuer() {
        let authority = TokenAuthority::new(SECRET, "tagbook", 3600);
        let token = authority.issue("admin", "admin").unwrap();

        let other_secret = TokenAuthority::new(b"another-secret", "tagbook", 3600);
        assert!(matches!(other_secret.verify(&token), Err(AuthError::InvalidToken(_))));

        let other_issuer = TokenAuthority::new(SECRET, "someone-else", 3600);
        assert!(matches!(other_issuer.verify(&token), Err(AuthError::InvalidToken(_))));

        assert!(matches!(authority.verify("garbage"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired() {
        let authority = TokenAuthority::new(SECRET, "tagbook", 3600);
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "admin".into(),
            role: "admin".into(),
            iss: "tagbook".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(authority.verify(&token), Err(AuthError::TokenExpired)));
    }
}
