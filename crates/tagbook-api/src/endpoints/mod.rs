// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// HTTP endpoint handlers, one module per resource

pub mod assistant;
pub mod auth;
pub mod features;
pub mod health;
pub mod meta_tags;
pub mod uploads;
