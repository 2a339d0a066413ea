// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

pub mod cors;

pub use cors::create_cors_layer;
