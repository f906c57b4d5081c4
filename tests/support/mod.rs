//! Shared fixtures and parse helpers for integration tests

pub mod fixtures;
pub mod parse_helpers;
