//! Opening the trip: resume a remembered session or prompt for the
//! passphrase, with retries on a terminal.

use chrono::Utc;
use tracing::debug;
use voyage_core::{DayPlan, SubmitOutcome, TripDocument, Unlocker, VoyageError};

use crate::constants::{env, MAX_UNLOCK_ATTEMPTS};
use crate::errors::CliError;
use crate::helpers::prompt_passphrase;
use crate::ui::{Spinner, UiContext};

use super::context::AppContext;

/// Whether a remembered session may skip the passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Use the cached trip when the session is remembered.
    Resume,
    /// Always fetch and decrypt.
    Fetch,
}

/// Unlock the trip and return it with its normalized days.
pub async fn open_trip(
    ctx: &AppContext<'_>,
    ui: &UiContext,
    mode: OpenMode,
    remember: bool,
    no_input: bool,
) -> anyhow::Result<(TripDocument, Vec<DayPlan>)> {
    let timeout = ctx.config()?.fetch_timeout()?;
    let source = ctx.source_location()?.into_source(timeout)?;

    let mut unlocker = Unlocker::new(source, ctx.session()?, ctx.calendar()?)
        .with_observer(Box::new(Spinner::new(ui)));

    if mode == OpenMode::Resume && unlocker.resume(Utc::now()).is_unlocked() {
        debug!("using remembered session");
        return unlocked(unlocker);
    }

    let location = unlocker.source_description();
    debug!(source = %location, "unlocking");
    unlocker.form_mut().remember = remember;

    let interactive = ui.is_interactive() && !no_input;
    let from_env = std::env::var(env::PASSPHRASE).is_ok_and(|value| !value.trim().is_empty());
    let max_attempts = if interactive && !from_env {
        MAX_UNLOCK_ATTEMPTS
    } else {
        1
    };
    let mut attempts = 0;

    loop {
        attempts += 1;
        let passphrase = prompt_passphrase(interactive)?;
        unlocker.form_mut().set_passphrase(passphrase.as_str());

        match unlocker.submit(Utc::now()).await {
            SubmitOutcome::Unlocked => return unlocked(unlocker),
            SubmitOutcome::Ignored => {
                return Err(CliError::invalid_input("Passphrase cannot be empty.").into());
            }
            SubmitOutcome::Rejected => {
                return Err(anyhow::anyhow!("An unlock attempt is already in progress"));
            }
            SubmitOutcome::Failed(VoyageError::IncorrectPassphrase) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    if max_attempts > 1 {
                        return Err(CliError::auth_failed_with_hint(
                            "Too many failed passphrase attempts.",
                            "Hint: The passphrase comes from whoever published the trip.",
                        )
                        .into());
                    }
                    return Err(CliError::auth_failed(unlocker.state().status()).into());
                }
                eprintln!(
                    "{} {} attempt{} remaining.",
                    unlocker.state().status(),
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            SubmitOutcome::Failed(err) => {
                debug!(source = %location, error = %err, "unlock failed");
                return Err(CliError::from_unlock(&err)
                    .with_hint(format!(
                        "Hint: Envelope source is {}. Change it with `voyage init --source`.",
                        location
                    ))
                    .into());
            }
        }
    }
}

fn unlocked<S: voyage_core::KeyValueStore>(
    unlocker: Unlocker<S>,
) -> anyhow::Result<(TripDocument, Vec<DayPlan>)> {
    unlocker
        .into_unlocked()
        .ok_or_else(|| anyhow::anyhow!("Unlock finished without a trip"))
}
