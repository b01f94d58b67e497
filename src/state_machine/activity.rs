// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live Value Activity State Machine
//!
//! Tracks whether a live value is observed and whether it has produced a
//! value for its current observers.
//!
//! # States
//!
//! - Unsubscribed: no observers, sources unplugged (initial)
//! - SubscribedNoValue: observed, nothing produced yet
//! - SubscribedHasValue: observed, at least one value produced
//!
//! # Inputs
//!
//! - Activate: first observer attached
//! - Emit: a new value was set
//! - Deactivate: last observer detached
//!
//! A deactivated value may be observed again later and re-enters the
//! subscribed states; there is no terminal state.

use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Lifecycle state of a live value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityState {
    /// No observers; not plugged into any source
    #[default]
    Unsubscribed,

    /// Observed, but no value produced yet
    SubscribedNoValue,

    /// Observed and holding a produced value
    SubscribedHasValue,
}

impl ActivityState {
    /// Whether the value currently has observers
    pub fn is_active(&self) -> bool {
        !matches!(self, ActivityState::Unsubscribed)
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityState::Unsubscribed => write!(f, "Unsubscribed"),
            ActivityState::SubscribedNoValue => write!(f, "SubscribedNoValue"),
            ActivityState::SubscribedHasValue => write!(f, "SubscribedHasValue"),
        }
    }
}

/// Lifecycle input (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityInput {
    /// First observer attached
    Activate {
        /// Whether a value is already present at activation time
        has_value: bool,
    },

    /// A value was set
    Emit,

    /// Last observer detached
    Deactivate,
}

impl fmt::Display for ActivityInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityInput::Activate { has_value } => write!(f, "Activate(has_value={has_value})"),
            ActivityInput::Emit => write!(f, "Emit"),
            ActivityInput::Deactivate => write!(f, "Deactivate"),
        }
    }
}

impl StateMachine for ActivityState {
    type Input = ActivityInput;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use ActivityInput::*;
        use ActivityState::*;

        match (self, input) {
            (Unsubscribed, Activate { has_value: false }) => Ok((SubscribedNoValue, ())),
            (Unsubscribed, Activate { has_value: true }) => Ok((SubscribedHasValue, ())),

            // Values may be set while nobody listens
            (Unsubscribed, Emit) => Ok((Unsubscribed, ())),
            (SubscribedNoValue | SubscribedHasValue, Emit) => Ok((SubscribedHasValue, ())),

            (SubscribedNoValue | SubscribedHasValue, Deactivate) => Ok((Unsubscribed, ())),

            (from, input) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                input: input.to_string(),
            }),
        }
    }
}
