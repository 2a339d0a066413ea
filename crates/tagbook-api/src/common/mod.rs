// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Common types used by every endpoint

pub mod error;
pub mod response;

pub use error::{ApiError, ApiErrorCode};
pub use response::MessageResponse;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
