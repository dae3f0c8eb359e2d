use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use voyage_core::VERSION;

/// Voyage - An offline-capable, passphrase-protected trip itinerary viewer
#[derive(Parser)]
#[command(name = "voyage")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Envelope location (URL or path to trip.enc.json)
    #[arg(short, long, global = true, env = "VOYAGE_SOURCE")]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `unlock` command
#[derive(Args)]
pub struct UnlockArgs {
    /// Keep the session unlocked on this device
    #[arg(long)]
    pub remember: bool,

    /// Disable interactive prompts (requires VOYAGE_PASSPHRASE)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `home` command
#[derive(Args)]
pub struct HomeArgs {
    /// Show the countdown as of this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `itinerary` command
#[derive(Args)]
pub struct ItineraryArgs {
    /// Only show this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub day: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (pretty, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `forget` command
#[derive(Args)]
pub struct ForgetArgs {
    /// Also delete the cached trip
    #[arg(long)]
    pub purge: bool,
}

/// Arguments for the `seal` command
#[derive(Args)]
pub struct SealArgs {
    /// Plaintext trip JSON
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Where to write the envelope (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// PBKDF2 iteration count
    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,
}

/// Arguments for the `init` command
///
/// The envelope location comes from the global `--source`.
#[derive(Args)]
pub struct InitArgs {
    /// Timezone used to decide "today" (IANA name or "auto")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unlock the trip with its passphrase
    Unlock(UnlockArgs),

    /// Show the trip countdown
    Home(HomeArgs),

    /// Show the day-by-day itinerary
    Itinerary(ItineraryArgs),

    /// Forget the remembered session
    Forget(ForgetArgs),

    /// Encrypt a plaintext trip file into an envelope
    Seal(SealArgs),

    /// Write a config file
    Init(InitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
