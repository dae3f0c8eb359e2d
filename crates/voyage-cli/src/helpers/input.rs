//! Passphrase prompting.

use dialoguer::Password;
use voyage_core::crypto::validate_passphrase;
use zeroize::Zeroizing;

use crate::constants::env;

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    let value = Zeroizing::new(std::env::var(env::PASSPHRASE).ok()?);
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

/// Prompt for the trip passphrase, or read it from VOYAGE_PASSPHRASE.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = passphrase_from_env() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            env::PASSPHRASE
        ));
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Prompt for a new envelope passphrase with confirmation.
pub fn prompt_seal_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = passphrase_from_env() {
        validate_passphrase(&value)
            .map_err(|e| anyhow::anyhow!("Passphrase does not meet requirements: {}", e))?;
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            env::PASSPHRASE
        ));
    }
    loop {
        let passphrase = Password::new()
            .with_prompt("Enter passphrase")
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
        if let Err(err) = validate_passphrase(&passphrase) {
            eprintln!("Passphrase does not meet requirements: {}", err);
            continue;
        }
        return Ok(passphrase);
    }
}
