//! Determinization: sampling one concrete world consistent with what an
//! observer can see.
//!
//! `GameState::copy(Some(observer))` is the usual entry point. The engine
//! is exposed for search code that resamples a registry directly.

pub mod engine;

pub use engine::{hidden_pools, redeterminize, DeterminizationSummary, PoolKey, Slot};
