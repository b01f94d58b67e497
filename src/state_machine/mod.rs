// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! This module provides the small state machine vocabulary used to track the
//! lifecycle of live values. Transitions are pure functions with no side
//! effects; the live value applies them under its own lock and logs the
//! outcome.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: States are strongly typed enums
//! 2. **Pure Functions**: All transitions are pure
//! 3. **Explicit**: Every transition is spelled out, invalid ones are errors
//!
//! # Example
//!
//! ```rust
//! use live_combinators::state_machine::{ActivityInput, ActivityState, StateMachine};
//!
//! let state = ActivityState::Unsubscribed;
//! let (state, _) = state
//!     .transition(&ActivityInput::Activate { has_value: false })
//!     .unwrap();
//! assert_eq!(state, ActivityState::SubscribedNoValue);
//! ```

pub mod activity;

pub use activity::{ActivityInput, ActivityState};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state with the given input is not allowed
    #[error("Invalid transition from {from} on {input}")]
    InvalidTransition {
        /// State the transition was attempted from
        from: String,
        /// Input that has no transition from that state
        input: String,
    },
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}
