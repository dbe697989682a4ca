// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bearer token handling for remote MCP endpoints.

mod token;

pub use token::{token_preview, BearerSecret, TokenManager, TokenState, BEARER_KEY};
