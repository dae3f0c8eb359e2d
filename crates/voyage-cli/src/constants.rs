//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, envelope source, cached trip).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Envelope could not be loaded or is malformed.
    pub const PAYLOAD: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const PASSPHRASE: &str = "VOYAGE_PASSPHRASE";
    pub const CONFIG: &str = "VOYAGE_CONFIG";
    pub const LOG: &str = "VOYAGE_LOG";
}

/// Interactive passphrase attempts before giving up.
pub const MAX_UNLOCK_ATTEMPTS: u32 = 3;
