// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Authentication errors; the messages are what clients see
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken(String),

    #[error("Token is not valid")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access required")]
    Forbidden,

    #[error("crypto error: {0}")]
    Crypto(String),
}
