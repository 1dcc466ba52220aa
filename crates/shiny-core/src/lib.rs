//! Odds engine and session store for Shiny Tracker.
//!
//! The crate has two halves. [`odds`] turns a [`HuntSettings`] into a
//! closed-form estimate of the chance of success per attempt. [`store`]
//! owns the current hunt plus the archive of completed hunts, persists both
//! to a [`KeyValueStore`] on a background writer, and notifies observers
//! after every change.

/// Lenient JSON encoding of sessions for durable storage.
pub mod codec;
/// Tracker configuration (data directory, defaults).
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Hunt methods, settings, sessions, and the aggregate app state.
pub mod hunt;
/// Closed-form odds estimation.
pub mod odds;
/// Durable key-value backends.
pub mod storage;
/// The session store: mutation API, observers, persistence.
pub mod store;
/// Background snapshot writer.
pub mod writer;

/// Re-export configuration.
pub use config::TrackerConfig;
/// Re-export error types.
pub use error::{ShinyError, ShinyResult};
/// Re-export the hunt data model.
pub use hunt::{AppState, HuntMethod, HuntSession, HuntSettings};
/// Re-export the odds engine entry point.
pub use odds::{OddsResult, estimate};
/// Re-export storage backends.
pub use storage::{DirStore, KeyValueStore, MemoryStore};
/// Re-export the session store.
pub use store::{SessionStore, SubscriptionId};
