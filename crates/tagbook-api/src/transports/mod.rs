// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Transport adapters

pub mod http;
