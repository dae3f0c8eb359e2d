//! UI primitives for the Voyage CLI.
//!
//! This module provides:
//! - **Context**: Terminal detection and the resolved display settings
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges, stage colors, owo-colors styling
//! - **Render**: Headers, key-value lines, tables, hints
//! - **Progress**: The unlock spinner
//! - **Format**: String utilities (truncate, wrap)

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::{DisplayFlags, Terminal, UiContext};
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, simple_table,
    Column,
};

pub use progress::Spinner;
