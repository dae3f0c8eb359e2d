//! Command handlers, one module per subcommand.

pub mod forget;
pub mod home;
pub mod init;
pub mod itinerary;
pub mod misc;
pub mod seal;
pub mod unlock;
