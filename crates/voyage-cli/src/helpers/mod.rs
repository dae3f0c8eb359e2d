//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Passphrase prompting (`input`)
//! - Date, timezone, and format parsing (`parsing`)

mod input;
mod parsing;

pub use input::{prompt_passphrase, prompt_seal_passphrase};
pub use parsing::{parse_date, parse_output_format, parse_timezone, OutputFormat};
