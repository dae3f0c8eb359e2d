use dialoguer::Input;
use voyage_core::SourceLocation;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, VoyageConfig};
use crate::errors::CliError;
use crate::helpers::parse_timezone;
use crate::ui::{hint, print, receipt};

/// Write a config file with the envelope source and timezone.
pub fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        ))
        .into());
    }

    let timezone = match args.timezone.as_deref() {
        Some(value) => parse_timezone(value)
            .map_err(|e| CliError::invalid_input(e.to_string()))?
            .map(|tz| tz.to_string()),
        None => None,
    };

    let ui = ctx.ui_context(false, None);
    let source = match ctx.cli().source.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(SourceLocation::parse(raw)),
        _ if ui.is_interactive() => prompt_source()?,
        _ => None,
    };

    let config = VoyageConfig::new(source, timezone);
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        let path = config_path.display().to_string();
        let source = match config.source_location()? {
            Some(location) => location.to_string(),
            None => "data directory".to_string(),
        };
        let timezone = config.ui.timezone.as_deref().unwrap_or("auto");
        print(
            &ui,
            &receipt(
                &ui,
                "Config written",
                &[
                    ("Path", path.as_str()),
                    ("Source", source.as_str()),
                    ("Timezone", timezone),
                ],
            ),
        );
        print(&ui, &hint(&ui, "voyage unlock --remember"));
    }
    Ok(())
}

fn prompt_source() -> anyhow::Result<Option<SourceLocation>> {
    let value: String = Input::new()
        .with_prompt("Envelope URL or path (blank for the data directory)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read source: {}", e))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(SourceLocation::parse(trimmed)))
}
