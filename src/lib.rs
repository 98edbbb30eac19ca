//! Target Picker - choose what a directional antenna points at
//!
//! This crate provides:
//! - A relay network model with change notifications
//! - A tree builder that orders bodies and satellites for selection
//! - A toolkit-independent tree view with expand/collapse and selection
//! - An interactive TUI and a plain-text renderer

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod network;
pub mod picker;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{PickerError, Result};
