//! Common test utilities and helpers
//!
//! Shared by the integration and CLI tests: isolated scratch repositories
//! driven by the real git binary, and assertions on their configuration.
#![allow(dead_code)]

#[macro_use]
pub mod assertion_helpers;
#[macro_use]
pub mod test_helpers;
