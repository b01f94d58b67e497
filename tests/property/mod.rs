// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify the
//! freshness and lifecycle guarantees of derived live values.

mod freshness;
mod lifecycle;
