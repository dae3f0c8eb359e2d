//! The unlock state machine.
//!
//! ```text
//!            submit (non-empty)            success
//!  Locked ─────────────────────> Unlocking ─────────> Unlocked (terminal)
//!    ^                               │
//!    └───────── failure ─────────────┘
//! ```
//!
//! `resume` can jump straight from `Locked` to `Unlocked` when a remembered
//! session and a cached itinerary are both present.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::envelope::EncryptedEnvelope;
use crate::error::{Result, VoyageError};
use crate::itinerary::normalize;
use crate::model::{DayPlan, TripDocument};
use crate::payload;
use crate::source::EnvelopeSource;
use crate::stage::TripCalendar;
use crate::store::{KeyValueStore, SessionStore};

/// Status shown while locked and nothing has been tried yet.
pub const LOCKED_PROMPT: &str = "Enter passphrase to unlock your trip details.";

/// Status shown while an attempt is in flight.
pub const UNLOCKING_STATUS: &str = "Unlocking...";

#[derive(Debug, Clone, PartialEq)]
pub enum UnlockState {
    Locked { status: String },
    Unlocking,
    Unlocked {
        document: TripDocument,
        days: Vec<DayPlan>,
    },
}

impl UnlockState {
    fn locked(status: impl Into<String>) -> Self {
        Self::Locked {
            status: status.into(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked { .. })
    }

    /// Status line for the current state.
    pub fn status(&self) -> &str {
        match self {
            Self::Locked { status } => status,
            Self::Unlocking => UNLOCKING_STATUS,
            Self::Unlocked { .. } => "",
        }
    }
}

/// The passphrase field and the remember checkbox.
#[derive(Debug)]
pub struct UnlockForm {
    passphrase: SecretString,
    pub remember: bool,
}

impl Default for UnlockForm {
    fn default() -> Self {
        Self {
            passphrase: SecretString::from(String::new()),
            remember: false,
        }
    }
}

impl UnlockForm {
    pub fn set_passphrase(&mut self, passphrase: impl Into<String>) {
        self.passphrase = SecretString::from(passphrase.into());
    }

    pub fn has_passphrase(&self) -> bool {
        !self.passphrase.expose_secret().is_empty()
    }

    fn clear_passphrase(&mut self) {
        self.passphrase = SecretString::from(String::new());
    }
}

/// Receives every status and state change of an `Unlocker`.
pub trait UnlockObserver: Send {
    fn on_status(&mut self, _status: &str) {}

    fn on_state(&mut self, _state: &UnlockState) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl UnlockObserver for NoopObserver {}

/// What a call to `submit` did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The passphrase field was empty; nothing happened.
    Ignored,
    /// An attempt was already in flight, or the app is already unlocked.
    Rejected,
    Unlocked,
    /// The attempt failed; the state is `Locked` with the error's message.
    Failed(VoyageError),
}

pub struct Unlocker<S> {
    source: Box<dyn EnvelopeSource>,
    session: SessionStore<S>,
    calendar: TripCalendar,
    observer: Box<dyn UnlockObserver>,
    state: UnlockState,
    form: UnlockForm,
    submit_enabled: bool,
}

impl<S: KeyValueStore> Unlocker<S> {
    pub fn new(
        source: Box<dyn EnvelopeSource>,
        session: SessionStore<S>,
        calendar: TripCalendar,
    ) -> Self {
        Self {
            source,
            session,
            calendar,
            observer: Box::new(NoopObserver),
            state: UnlockState::locked(LOCKED_PROMPT),
            form: UnlockForm::default(),
            submit_enabled: true,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn UnlockObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> &UnlockState {
        &self.state
    }

    pub fn form(&self) -> &UnlockForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UnlockForm {
        &mut self.form
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Where the envelope is fetched from.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Consume the unlocker, returning the document and days if unlocked.
    pub fn into_unlocked(self) -> Option<(TripDocument, Vec<DayPlan>)> {
        match self.state {
            UnlockState::Unlocked { document, days } => Some((document, days)),
            _ => None,
        }
    }

    /// Restore a remembered session from cache without fetching.
    ///
    /// Unlocks only if the session is still remembered at `now` and the
    /// cached document has at least one day. Otherwise the state is `Locked`
    /// with the default prompt.
    pub fn resume(&mut self, now: DateTime<Utc>) -> &UnlockState {
        if self.state.is_unlocked() {
            return &self.state;
        }

        let cached = if self.session.is_remembered(now) {
            self.session.load().filter(TripDocument::has_days)
        } else {
            None
        };

        match cached {
            Some(document) => {
                debug!("resuming remembered session from cache");
                let days = normalize(&document, &self.calendar);
                self.transition(UnlockState::Unlocked { document, days });
            }
            None => self.transition(UnlockState::locked(LOCKED_PROMPT)),
        }
        &self.state
    }

    /// Attempt an unlock with the current form contents.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> SubmitOutcome {
        if !self.submit_enabled || !matches!(self.state, UnlockState::Locked { .. }) {
            return SubmitOutcome::Rejected;
        }
        if !self.form.has_passphrase() {
            return SubmitOutcome::Ignored;
        }

        self.submit_enabled = false;
        self.transition(UnlockState::Unlocking);

        let result = self.attempt(now).await;
        self.submit_enabled = true;

        match result {
            Ok((document, days)) => {
                info!(days = days.len(), "trip unlocked");
                self.form.clear_passphrase();
                self.transition(UnlockState::Unlocked { document, days });
                SubmitOutcome::Unlocked
            }
            Err(err) => {
                debug!(error = %err, "unlock attempt failed");
                self.transition(UnlockState::locked(err.user_message()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn attempt(&self, now: DateTime<Utc>) -> Result<(TripDocument, Vec<DayPlan>)> {
        let raw = self.source.fetch().await?;
        let envelope = EncryptedEnvelope::from_json(&raw)?;

        let passphrase = Zeroizing::new(self.form.passphrase.expose_secret().to_string());
        let document = tokio::task::spawn_blocking(move || payload::decrypt(&envelope, &passphrase))
            .await
            .map_err(|e| VoyageError::Io {
                source: std::io::Error::other(format!("decrypt task failed: {}", e)),
            })??;

        self.session.save(&document)?;
        self.session.set_remembered(self.form.remember, now)?;

        let days = normalize(&document, &self.calendar);
        Ok((document, days))
    }

    fn transition(&mut self, state: UnlockState) {
        self.state = state;
        self.observer.on_status(self.state.status());
        self.observer.on_state(&self.state);
    }
}
