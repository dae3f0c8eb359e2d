//! Path and source resolution.

use std::path::{Path, PathBuf};

use voyage_core::SourceLocation;

use crate::config::{default_config_path, read_config, VoyageConfig};
use crate::constants::env;

/// File name of the envelope looked up in the data directory when no
/// source is configured.
pub const DEFAULT_ENVELOPE_FILE: &str = "trip.enc.json";

/// Resolve the config file path, checking VOYAGE_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load config, treating a missing file as all defaults.
pub fn load_config(path: &Path) -> anyhow::Result<VoyageConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(VoyageConfig::default());
    }
    read_config(path)
}

/// Pick the envelope location: flag or env, then config, then the data
/// directory.
pub fn resolve_source(
    flag: Option<&str>,
    config: &VoyageConfig,
    data_dir: &Path,
) -> anyhow::Result<SourceLocation> {
    if let Some(raw) = flag.map(str::trim).filter(|raw| !raw.is_empty()) {
        return Ok(SourceLocation::parse(raw));
    }
    if let Some(location) = config.source_location()? {
        return Ok(location);
    }
    Ok(SourceLocation::Path(data_dir.join(DEFAULT_ENVELOPE_FILE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        let mut config = VoyageConfig::default();
        config.source.path = Some("/srv/trip.enc.json".to_string());

        let location = resolve_source(
            Some("https://example.org/trip.enc.json"),
            &config,
            Path::new("/data"),
        )
        .unwrap();

        assert_eq!(
            location,
            SourceLocation::Url("https://example.org/trip.enc.json".to_string())
        );
    }

    #[test]
    fn test_config_then_data_dir() {
        let mut config = VoyageConfig::default();
        let data_dir = Path::new("/data/voyage");

        assert_eq!(
            resolve_source(None, &config, data_dir).unwrap(),
            SourceLocation::Path(data_dir.join("trip.enc.json"))
        );

        config.source.path = Some("/srv/trip.enc.json".to_string());
        assert_eq!(
            resolve_source(Some("  "), &config, data_dir).unwrap(),
            SourceLocation::Path(PathBuf::from("/srv/trip.enc.json"))
        );
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.session.remember_days, 30);
    }
}
