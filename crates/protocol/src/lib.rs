//! # ab-protocol
//!
//! Core protocol definitions and data models for api-bridge.
//!
//! This crate defines all shared data structures used for:
//! - The ordered stages a simulated request passes through
//! - The resolved record and the mutable flow session snapshot
//! - Flow configuration (`.api-bridge/config.toml`)
//! - Commands and notifications between a controller and its consumers
//!
//! ## Modules
//!
//! - [`stage_models`]: Stage tag and the fixed working order
//! - [`record_models`]: Result record produced by resolution
//! - [`session_models`]: Flow session snapshot, mode and speed
//! - [`config_models`]: Flow configuration file
//! - [`ipc`]: Operations and Events for controller/consumer communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other api-bridge crates

pub mod config_models;
pub mod ipc;
pub mod record_models;
pub mod session_models;
pub mod stage_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use record_models::*;
pub use session_models::*;
pub use stage_models::*;
