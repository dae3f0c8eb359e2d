use std::path::Path;

use voyage_core::payload::{seal_document, DEFAULT_SEAL_ITERATIONS};
use voyage_core::TripDocument;

use crate::app::AppContext;
use crate::cli::SealArgs;
use crate::errors::CliError;
use crate::helpers::prompt_seal_passphrase;
use crate::ui::{badge, print, receipt, Badge};

/// Encrypt a plaintext trip file into an envelope.
pub fn handle_seal(ctx: &AppContext<'_>, args: &SealArgs) -> anyhow::Result<()> {
    let iterations = args.iterations.unwrap_or(DEFAULT_SEAL_ITERATIONS);
    if iterations == 0 {
        return Err(CliError::invalid_input("--iterations must be at least 1").into());
    }

    let document = read_trip(Path::new(&args.input))?;
    let ui = ctx.ui_context(false, None);
    if !document.has_days() && !ctx.quiet() {
        eprintln!(
            "{}",
            badge(&ui, Badge::Warn, "Trip has no itinerary days; unlocking it shows nothing.")
        );
    }

    let passphrase = prompt_seal_passphrase(ui.is_interactive())?;
    let envelope = seal_document(&document, &passphrase, iterations)?;
    let mut json = serde_json::to_string_pretty(&envelope.to_json())?;
    json.push('\n');

    match args.output.as_deref() {
        Some(output) => {
            voyage_core::fs::write_atomic(Path::new(output), json.as_bytes())?;
            if !ctx.quiet() {
                let iterations = iterations.to_string();
                print(
                    &ui,
                    &receipt(
                        &ui,
                        "Sealed trip",
                        &[("Output", output), ("Iterations", iterations.as_str())],
                    ),
                );
            }
        }
        None => print!("{}", json),
    }
    Ok(())
}

fn read_trip(path: &Path) -> anyhow::Result<TripDocument> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CliError::not_found(
            format!("Cannot read {}: {}", path.display(), e),
            "Hint: Pass the plaintext trip JSON file to seal.",
        )
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::invalid_input(format!("{} is not a trip document: {}", path.display(), e)).into()
    })
}
