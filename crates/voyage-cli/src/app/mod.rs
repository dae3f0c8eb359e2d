//! Application-level utilities for the Voyage CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Config path and envelope source resolution
//! - The unlock flow with passphrase retries

mod context;
mod resolver;
mod unlock;

pub use context::AppContext;
pub use resolver::{load_config, resolve_config_path};
pub use unlock::{open_trip, OpenMode};
