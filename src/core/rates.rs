//! Rate tables and the built-in fallback rates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Currency every rate in a [`RateTable`] is quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// Units of each currency per one USD, used until a live table arrives.
pub const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("NGN", 1550.0),
    ("CAD", 1.36),
    ("AUD", 1.52),
    ("KES", 129.0),
    ("GHS", 15.5),
    ("ZAR", 18.5),
    ("INR", 83.0),
    ("JPY", 149.0),
    ("CNY", 7.24),
];

/// Mapping from currency code to units of that currency per one USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    /// Builds the static table from [`FALLBACK_RATES`].
    pub fn fallback() -> Self {
        FALLBACK_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Currency codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.0.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Fallback,
    Live,
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Fallback => write!(f, "fallback"),
            RateSource::Live => write!(f, "live"),
        }
    }
}

/// The unit of replacement held by a rate provider.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rates: Arc<RateTable>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    pub fn fallback() -> Self {
        Self {
            rates: Arc::new(RateTable::fallback()),
            last_updated: None,
        }
    }

    pub fn live(rates: RateTable, fetched_at: DateTime<Utc>) -> Self {
        Self {
            rates: Arc::new(rates),
            last_updated: Some(fetched_at),
        }
    }

    pub fn source(&self) -> RateSource {
        if self.last_updated.is_some() {
            RateSource::Live
        } else {
            RateSource::Fallback
        }
    }
}
