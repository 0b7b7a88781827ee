//! Configuration loading and management.
//!
//! This module provides functionality to load the flow configuration from
//! the `.api-bridge/` directory.

pub mod error;
pub mod loader;
pub mod models;
