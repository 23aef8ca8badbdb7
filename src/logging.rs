// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup. Logs go to stderr so stdout carries only the
//! command's status output.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, DEFAULT_LOG_FILTER};
use crate::error::AppError;

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}
