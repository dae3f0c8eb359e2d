use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use voyage_core::source::DEFAULT_TIMEOUT;
use voyage_core::store::DEFAULT_REMEMBER_DAYS;
use voyage_core::{Leg, SourceLocation, TripCalendar};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoyageConfig {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip: Option<TripSection>,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_remember_days")]
    pub remember_days: u32,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            remember_days: default_remember_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSection {
    pub homecoming: NaiveDate,
    pub first_leg: Leg,
    pub second_leg: Leg,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_remember_days() -> u32 {
    DEFAULT_REMEMBER_DAYS
}

impl VoyageConfig {
    pub fn new(source: Option<SourceLocation>, timezone: Option<String>) -> Self {
        let mut config = Self::default();
        match source {
            Some(SourceLocation::Url(url)) => config.source.url = Some(url),
            Some(SourceLocation::Path(path)) => {
                config.source.path = Some(path.to_string_lossy().to_string())
            }
            None => {}
        }
        config.ui.timezone = timezone;
        config
    }

    /// Configured envelope location, if any.
    pub fn source_location(&self) -> anyhow::Result<Option<SourceLocation>> {
        match (&self.source.url, &self.source.path) {
            (Some(_), Some(_)) => Err(anyhow::anyhow!(
                "Config sets both source.url and source.path; keep one"
            )),
            (Some(url), None) => Ok(Some(SourceLocation::Url(url.clone()))),
            (None, Some(path)) => Ok(Some(SourceLocation::Path(PathBuf::from(path)))),
            (None, None) => Ok(None),
        }
    }

    /// Trip calendar from `[trip]`, or the built-in one.
    pub fn calendar(&self) -> anyhow::Result<TripCalendar> {
        match &self.trip {
            Some(trip) => TripCalendar::new(
                trip.first_leg.clone(),
                trip.second_leg.clone(),
                trip.homecoming,
            )
            .map_err(|e| anyhow::anyhow!("Invalid [trip] section: {}", e)),
            None => Ok(TripCalendar::default()),
        }
    }

    pub fn remember_ttl(&self) -> anyhow::Result<chrono::Duration> {
        if self.session.remember_days == 0 {
            return Err(anyhow::anyhow!("session.remember_days must be at least 1"));
        }
        Ok(chrono::Duration::days(i64::from(self.session.remember_days)))
    }

    pub fn fetch_timeout(&self) -> anyhow::Result<std::time::Duration> {
        if self.source.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("source.timeout_seconds must be at least 1"));
        }
        Ok(std::time::Duration::from_secs(self.source.timeout_seconds))
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<VoyageConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &VoyageConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("voyage"));
        }
    }
    Ok(home_dir()?.join(".config").join("voyage"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("voyage"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("voyage"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
