// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Service-layer types shared by the HTTP adapter and the CLI.
*/

pub mod assistant;
pub mod content;
pub mod errors;

pub use assistant::*;
pub use content::*;
pub use errors::*;
