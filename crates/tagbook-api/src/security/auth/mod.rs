// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

pub mod context;
pub mod error;
pub mod password;
pub mod token;

pub use context::{AuthContext, AuthMethod};
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{AdminClaims, TokenAuthority};

use tagbook_config::AuthConfig;

/// Role carried by every token this server issues
pub const ADMIN_ROLE: &str = "admin";

/// Admin credential check plus token issuing
pub struct AdminAuth {
    pub tokens: TokenAuthority,
    username: String,
    password_hash: String,
}

impl AdminAuth {
    pub fn new(tokens: TokenAuthority, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            tokens,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        if config.admin_password_hash.is_empty() {
            tracing::warn!(
                target: "tagbook-api",
                "No admin password hash configured; admin login is disabled (see `tagbook hash-password`)"
            );
        }
        Self::new(
            TokenAuthority::from_config(config),
            config.admin_username.clone(),
            config.admin_password_hash.clone(),
        )
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check credentials and issue a token
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown user, a wrong password, or when no
    /// admin password is configured
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if self.password_hash.is_empty() || username != self.username {
            return Err(AuthError::InvalidCredentials);
        }
        if !verify_password(password, &self.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        self.tokens.issue(&self.username, ADMIN_ROLE)
    }
}
