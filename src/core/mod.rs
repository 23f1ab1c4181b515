//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod format;
pub mod log;
pub mod provider;
pub mod rates;
pub mod source;

// Re-export main types for cleaner imports
pub use converter::{convert, get_rate};
pub use provider::{RateProvider, RateStatus};
pub use rates::{RateSnapshot, RateSource, RateTable};
pub use source::{AcquisitionError, LiveRateSource};
