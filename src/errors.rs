// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for live value operations

use thiserror::Error;

use crate::frp::SignalId;

/// Errors that can occur while wiring live values together
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiveError {
    /// The upstream value is already registered as a source of this derived value
    #[error("Source {upstream} is already attached to live value {target}")]
    SourceAlreadyAdded {
        /// Live value the source was being added to
        target: SignalId,
        /// Upstream live value that was added twice
        upstream: SignalId,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for live value operations
pub type LiveResult<T> = Result<T, LiveError>;
