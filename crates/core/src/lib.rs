//! # ab-core
//!
//! Data resolver and staged flow controller for api-bridge.
//!
//! This crate provides:
//! - Configuration loading from `.api-bridge/` directory
//! - A pure resolver from free-text queries to records
//! - Synthetic per-stage payloads for presentation
//! - The flow controller state machine, its timed driver and service loop
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`resolver`]: Query normalization, catalog lookup and record normalization
//! - [`payload`]: Synthetic request/response bodies for each stage
//! - [`engine`]: Stage timing and the automatic, cancellable driver
//! - [`state`]: Session transitions, the controller and its service loop
//! - [`error`]: Domain error type

pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod resolver;
pub mod state;
