//! Iron Man run tracking.
//!
//! A run walks a shuffled roster of characters one at a time: each character
//! is either completed or the whole run fails. [`RunTracker`] owns the single
//! active run behind a lock and enforces the legal transitions; clients only
//! ever see [`RunState`] snapshots. The [`command`] module exposes the same
//! operations as serializable requests and responses for UI bridges.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod roster;
pub mod state;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use command::{Request, Response};
pub use config::{ConfigError, TrackerConfig};
pub use error::{ErrorKind, RunError, RunResult};
pub use state::{RunPhase, RunState};
pub use tracker::RunTracker;
