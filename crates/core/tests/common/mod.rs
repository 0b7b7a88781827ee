//! Common test utilities for flow controller integration tests.
//!
//! This module provides shared functionality across integration tests:
//! - Controller fixtures
//! - Event collection helpers
//! - Custom assertions

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
