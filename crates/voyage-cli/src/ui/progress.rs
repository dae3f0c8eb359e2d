//! Spinner shown while an unlock attempt is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use voyage_core::{UnlockObserver, UnlockState};

use super::context::UiContext;
use super::theme::spinner_frames;

/// A spinner for indeterminate progress.
///
/// Outside an animated terminal it does nothing, so it can be wired in
/// unconditionally.
pub struct Spinner {
    bar: Option<ProgressBar>,
    unicode: bool,
}

impl Spinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            bar: None,
            unicode: ctx.unicode,
        }
        .animated(ctx.allows_animation())
    }

    fn animated(mut self, enabled: bool) -> Self {
        if enabled {
            let template = if self.unicode {
                "{spinner:.cyan} {msg}"
            } else {
                "{spinner} {msg}"
            };
            let style = ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(spinner_frames(self.unicode));
            let bar = ProgressBar::new_spinner();
            bar.set_style(style);
            self.bar = Some(bar);
        }
        self
    }

    pub fn start(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn is_animated(&self) -> bool {
        self.bar.is_some()
    }
}

impl UnlockObserver for Spinner {
    fn on_state(&mut self, state: &UnlockState) {
        match state {
            UnlockState::Unlocking => self.start(state.status()),
            _ => self.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::tests::{plain_ctx, pretty_ctx};

    #[test]
    fn test_plain_spinner_is_inert() {
        let mut spinner = Spinner::new(&plain_ctx());
        assert!(!spinner.is_animated());
        spinner.on_state(&UnlockState::Unlocking);
        spinner.clear();
    }

    #[test]
    fn test_pretty_spinner_animates() {
        let mut spinner = Spinner::new(&pretty_ctx());
        assert!(spinner.is_animated());
        spinner.on_state(&UnlockState::Unlocking);
        spinner.on_state(&UnlockState::Locked {
            status: "Incorrect passphrase.".to_string(),
        });
    }
}
