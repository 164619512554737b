// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tracing setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` directives are honoured; `level` is added on top as the
/// default. Logs go to stderr so report output on stdout can be piped.
pub fn init(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}
