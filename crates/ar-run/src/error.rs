//! Error types for run tracking.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Errors returned when a run operation is rejected.
///
/// A rejected operation never changes the tracked state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The roster passed to start a run was empty.
    #[error("cannot start a run with an empty roster")]
    EmptyRoster,

    /// The roster named the same character more than once.
    #[error("duplicate character in roster: {0}")]
    DuplicateCharacter(String),

    /// The roster contained an empty or whitespace-only name.
    #[error("character names must not be blank")]
    BlankCharacter,

    /// A shuffle asked for more positions than a client may request.
    #[error("shuffle length {len} exceeds the maximum of {max}")]
    ShuffleTooLong {
        /// Requested length.
        len: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// The character is not part of the current run.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// The character was already completed in the current run.
    #[error("character already completed: {0}")]
    AlreadyCompleted(String),

    /// The run has failed and is frozen.
    #[error("the run has failed; no further characters can be completed")]
    RunFailed,

    /// Every character in the run has been completed.
    #[error("the run is finished; no characters remain in the queue")]
    RunFinished,

    /// The run is already marked as failed.
    #[error("the run has already failed")]
    AlreadyFailed,

    /// No run has been started, or the last one was reset.
    #[error("no active run")]
    NoActiveRun,
}

/// Coarse classification of a [`RunError`] for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request carried bad data (roster or character name).
    InvalidInput,
    /// The request is not valid in the run's current phase.
    IllegalTransition,
    /// The request needs a run and there is none.
    NoActiveRun,
}

impl RunError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyRoster
            | Self::DuplicateCharacter(_)
            | Self::BlankCharacter
            | Self::ShuffleTooLong { .. }
            | Self::UnknownCharacter(_)
            | Self::AlreadyCompleted(_) => ErrorKind::InvalidInput,
            Self::RunFailed | Self::RunFinished | Self::AlreadyFailed => {
                ErrorKind::IllegalTransition
            }
            Self::NoActiveRun => ErrorKind::NoActiveRun,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::IllegalTransition => write!(f, "illegal transition"),
            Self::NoActiveRun => write!(f, "no active run"),
        }
    }
}
