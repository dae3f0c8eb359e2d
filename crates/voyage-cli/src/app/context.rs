//! Application context for the Voyage CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config so handlers
//! don't thread both around.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use once_cell::unsync::OnceCell;
use voyage_core::{FileStore, SessionStore, SourceLocation, TripCalendar};

use crate::cli::Cli;
use crate::config::{xdg_data_dir, VoyageConfig};
use crate::errors::CliError;
use crate::helpers::{parse_timezone, OutputFormat};
use crate::ui::{DisplayFlags, Terminal, UiContext};

use super::resolver::{load_config, resolve_config_path, resolve_source};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<VoyageConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Config file contents, read on first use.
    pub fn config(&self) -> anyhow::Result<&VoyageConfig> {
        self.config
            .get_or_try_init(|| load_config(&resolve_config_path()?))
    }

    /// UI context for a command's output flags.
    pub fn ui_context(&self, json: bool, format: Option<OutputFormat>) -> UiContext {
        UiContext::new(
            Terminal::detect(),
            DisplayFlags {
                json,
                format,
                no_color: self.cli.no_color,
                ascii: self.cli.ascii,
            },
        )
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        xdg_data_dir()
    }

    pub fn calendar(&self) -> anyhow::Result<TripCalendar> {
        self.config()?.calendar()
    }

    pub fn source_location(&self) -> anyhow::Result<SourceLocation> {
        resolve_source(self.cli.source.as_deref(), self.config()?, &self.data_dir()?)
    }

    /// Cache and remember-me slots under the data directory.
    pub fn session(&self) -> anyhow::Result<SessionStore<FileStore>> {
        let store = FileStore::open(self.data_dir()?)?;
        Ok(SessionStore::with_ttl(store, self.config()?.remember_ttl()?))
    }

    /// Today's date in the configured timezone, or the system one.
    pub fn today(&self) -> anyhow::Result<NaiveDate> {
        let configured = self.config()?.ui.timezone.as_deref().unwrap_or("auto");
        let tz = parse_timezone(configured).map_err(|e| CliError::invalid_input(e.to_string()))?;
        Ok(match tz {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        })
    }
}
