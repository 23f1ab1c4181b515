//! Holds the current rate table and upgrades it from a live source once.

use super::converter;
use super::rates::{RateSnapshot, RateSource, RateTable};
use super::source::{AcquisitionError, LiveRateSource};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq)]
pub struct RateStatus {
    pub is_loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub source: RateSource,
}

/// Runs a single bounded fetch against `source`.
///
/// The deadline is handed to the source and also enforced here, so a source
/// that ignores it still cannot outlive `timeout`.
pub async fn fetch_once(
    source: &dyn LiveRateSource,
    timeout: Duration,
) -> Result<RateTable, AcquisitionError> {
    let deadline = Instant::now() + timeout;
    match tokio::time::timeout_at(deadline, source.fetch_rates(deadline)).await {
        Ok(result) => result,
        Err(_) => Err(AcquisitionError::Timeout(timeout)),
    }
}

struct Inner {
    source: Option<Arc<dyn LiveRateSource>>,
    timeout: Duration,
    snapshot: RwLock<RateSnapshot>,
    fetch: watch::Sender<FetchState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Idle,
    Loading,
    Done,
}

/// Marks the fetch as done when dropped, including when the source panics.
struct FetchDone<'a>(&'a watch::Sender<FetchState>);

impl Drop for FetchDone<'_> {
    fn drop(&mut self) {
        self.0.send_replace(FetchState::Done);
    }
}

impl Inner {
    fn snapshot(&self) -> RateSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, snapshot: RateSnapshot) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    async fn refresh(&self, source: &dyn LiveRateSource) {
        let _done = FetchDone(&self.fetch);
        match fetch_once(source, self.timeout).await {
            Ok(rates) => {
                info!(currencies = rates.len(), "Switching to live exchange rates");
                self.replace(RateSnapshot::live(rates, Utc::now()));
            }
            Err(e) => {
                warn!(error = %e, "Live rates unavailable, keeping fallback rates");
            }
        }
    }
}

/// Shared handle to a replaceable rate snapshot.
///
/// Starts on the static fallback table. The first [`RateProvider::acquire`]
/// kicks off one live fetch in the background; readers never wait for it.
#[derive(Clone)]
pub struct RateProvider {
    inner: Arc<Inner>,
}

impl RateProvider {
    pub fn new(source: Arc<dyn LiveRateSource>, timeout: Duration) -> Self {
        Self::build(Some(source), timeout)
    }

    /// A provider that never leaves the fallback table.
    pub fn offline() -> Self {
        Self::build(None, DEFAULT_FETCH_TIMEOUT)
    }

    fn build(source: Option<Arc<dyn LiveRateSource>>, timeout: Duration) -> Self {
        let (fetch, _) = watch::channel(FetchState::Idle);
        Self {
            inner: Arc::new(Inner {
                source,
                timeout,
                snapshot: RwLock::new(RateSnapshot::fallback()),
                fetch,
            }),
        }
    }

    /// Returns the rates currently in effect and, on first use, starts the
    /// live fetch. Never blocks and never fails.
    pub fn acquire(&self) -> Arc<RateTable> {
        let current = self.rates();

        let Some(source) = self.inner.source.clone() else {
            return current;
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "No async runtime, keeping fallback rates");
                return current;
            }
        };

        // Claiming the fetch and flagging it as loading happen under one lock.
        let claimed = self.inner.fetch.send_if_modified(|state| {
            if *state == FetchState::Idle {
                *state = FetchState::Loading;
                true
            } else {
                false
            }
        });
        if !claimed {
            return current;
        }

        debug!(timeout = ?self.inner.timeout, "Starting live rate fetch");
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move { inner.refresh(source.as_ref()).await });

        current
    }

    pub fn rates(&self) -> Arc<RateTable> {
        self.inner.snapshot().rates
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.fetch.borrow() == FetchState::Loading
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.inner.snapshot().last_updated
    }

    pub fn status(&self) -> RateStatus {
        let snapshot = self.inner.snapshot();
        RateStatus {
            is_loading: self.is_loading(),
            last_updated: snapshot.last_updated,
            source: snapshot.source(),
        }
    }

    /// Resolves once no live fetch is in flight.
    pub async fn settled(&self) {
        let mut rx = self.inner.fetch.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|state| *state != FetchState::Loading).await;
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        converter::convert(&self.rates(), amount, from, to)
    }

    pub fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        converter::get_rate(&self.rates(), from, to)
    }
}
