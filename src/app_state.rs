//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use time::OffsetDateTime;

use crate::{Error, config::LedgerConfig, timezone::local_now, transaction::Ledger};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction ledger shared by every request.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The accounts, categories and currency format offered by the page.
    pub config: Arc<LedgerConfig>,
}

impl AppState {
    /// Create a new [AppState] that owns `ledger`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    pub fn new(ledger: Ledger, local_timezone: &str, config: LedgerConfig) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: local_timezone.to_owned(),
            config: Arc::new(config),
        }
    }
}

/// The state needed by the transaction handlers.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub local_timezone: String,
    pub config: Arc<LedgerConfig>,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
            config: state.config.clone(),
        }
    }
}

impl LedgerState {
    /// Acquire the ledger lock.
    ///
    /// # Errors
    /// Returns [Error::LedgerLockError] if the lock is poisoned.
    pub fn lock(&self) -> Result<MutexGuard<'_, Ledger>, Error> {
        self.ledger
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
            .map_err(|_| Error::LedgerLockError)
    }

    /// The current date-time in the server's timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the configured timezone is invalid.
    pub fn now(&self) -> Result<OffsetDateTime, Error> {
        local_now(&self.local_timezone)
    }
}
