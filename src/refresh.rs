//! Recomputing the summary whenever the dashboard asks for fresh data.
//!
//! Each refresh is an independent load. Refreshes may overlap, e.g. when the
//! dashboard regains focus several times in quick succession, so results are
//! stamped with a generation number and a refresh that started earlier never
//! replaces the result of one that started later.

use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    Error,
    config::SummaryConfig,
    dashboard::{Summary, load_summary},
    store::KeyValueStore,
    user::UserProfile,
};

#[derive(Default)]
struct Published {
    generation: u64,
    summary: Option<Summary>,
}

/// Loads and publishes the dashboard summary for one user.
pub struct SummaryRefresher<S> {
    store: S,
    user: UserProfile,
    config: SummaryConfig,
    generation: AtomicU64,
    published: Mutex<Published>,
}

impl<S: KeyValueStore> SummaryRefresher<S> {
    /// Create a refresher for `user`. Nothing is loaded until [Self::refresh]
    /// is called.
    pub fn new(store: S, user: UserProfile, config: SummaryConfig) -> Self {
        Self {
            store,
            user,
            config,
            generation: AtomicU64::new(0),
            published: Mutex::new(Published::default()),
        }
    }

    /// The store transactions are read from.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The user whose transactions are summarised.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Load the transactions and publish a new summary.
    ///
    /// Returns the new summary, or `None` if a refresh that started later
    /// has already published its result, in which case this result is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the summary, or
    /// [Error::DatabaseLockError] if the published summary's lock is
    /// poisoned. A failed refresh leaves the published summary untouched.
    pub fn refresh(&self) -> Result<Option<Summary>, Error> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting summary refresh {ticket} for user {}", self.user.id);

        let summary = load_summary(&self.store, &self.user.id, &self.config)?;

        let mut published = self
            .published
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        if ticket < published.generation {
            tracing::debug!(
                "Discarding summary refresh {ticket}, refresh {} already published",
                published.generation
            );
            return Ok(None);
        }

        published.generation = ticket;
        published.summary = Some(summary.clone());

        Ok(Some(summary))
    }

    /// The most recently published summary, if any refresh has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [Error::DatabaseLockError] if the published summary's lock is
    /// poisoned.
    pub fn latest(&self) -> Result<Option<Summary>, Error> {
        let published = self.published.lock().map_err(|_| {
            tracing::error!("Could not read the published summary: the lock is poisoned");
            Error::DatabaseLockError
        })?;

        Ok(published.summary.clone())
    }
}
