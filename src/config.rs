// Copyright (c) 2025 - Cowboy AI, Inc.

//! Live value configuration

use serde::{Deserialize, Serialize};

use crate::errors::{LiveError, LiveResult};

/// Configuration for a single live value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Label attached to tracing output for this value
    pub name: String,

    /// Deliver the current value to an observer as soon as it attaches
    pub replay_current: bool,

    /// Keep the current value when the last observer detaches
    pub retain_when_inactive: bool,
}

impl LiveConfig {
    /// Create a configuration with the given tracing label
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Configuration used for values produced by the combinators.
    ///
    /// Derived values drop their value when they go inactive, so every new
    /// activation starts without a value and recomputes from its sources.
    pub fn derived() -> Self {
        Self {
            name: "derived".to_string(),
            replay_current: true,
            retain_when_inactive: false,
        }
    }

    /// Set the tracing label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether new observers receive the current value immediately
    pub fn with_replay_current(mut self, replay_current: bool) -> Self {
        self.replay_current = replay_current;
        self
    }

    /// Set whether the value survives periods without observers
    pub fn with_retain_when_inactive(mut self, retain: bool) -> Self {
        self.retain_when_inactive = retain;
        self
    }

    /// Check the configuration for values that cannot be used
    pub fn validate(&self) -> LiveResult<()> {
        if self.name.trim().is_empty() {
            return Err(LiveError::Configuration(
                "live value name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            name: "live".to_string(),
            replay_current: true,
            retain_when_inactive: true,
        }
    }
}
