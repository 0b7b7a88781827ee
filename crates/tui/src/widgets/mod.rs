//! TUI widgets module.
//!
//! This module contains the widgets that render a flow session snapshot.

pub mod payload_view;
pub mod stage_copy;
pub mod timeline;

pub use payload_view::PayloadView;
pub use stage_copy::{stage_copy, StageCopy};
