//! State management for flow sessions.
//!
//! This module provides:
//! - Session state machine transitions
//! - The shared, generation-checked session slot
//! - FlowController for owning and driving one session at a time
//! - A service loop that applies `Op`s to a controller

pub mod controller;
pub mod service;
pub mod session;
pub(crate) mod shared;
