// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Admin authentication: password check, signed tokens, request extractor

pub mod auth;

pub use auth::{AdminAuth, AuthContext, AuthError, ADMIN_ROLE};
