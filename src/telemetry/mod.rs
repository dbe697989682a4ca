// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging infrastructure.
//!
//! The library logs through `tracing`; embedders decide where it goes. For a
//! ready-made stderr subscriber:
//!
//! ```rust,ignore
//! use mcp_bootstrap::telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::default())?;
//! ```
//!
//! Tokens are never logged in full; use [`crate::auth::token_preview`].

mod init;

pub use init::{init_telemetry, TelemetryConfig};
