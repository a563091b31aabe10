//! Run snapshots as seen by clients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the tracked run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// No run in progress (`run_id == 0`).
    Idle,
    /// A run is in progress and has not failed. Includes finished runs.
    Active,
    /// The run failed; its queue and completed lists are frozen.
    Failed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A snapshot of the tracked run.
///
/// `queue` and `completed` always partition the roster the run was started
/// with. The idle state is [`RunState::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Run number; 0 when idle.
    pub run_id: u64,
    /// Characters not yet attempted, next first.
    pub queue: Vec<String>,
    /// Characters completed, in completion order.
    pub completed: Vec<String>,
    /// Whether the run has failed.
    pub failed: bool,
    /// When the run started, in ms since the epoch.
    pub started_at_ms: Option<i64>,
    /// When the run last changed, in ms since the epoch.
    pub updated_at_ms: Option<i64>,
}

impl RunState {
    /// The run's lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        if self.run_id == 0 {
            RunPhase::Idle
        } else if self.failed {
            RunPhase::Failed
        } else {
            RunPhase::Active
        }
    }

    /// Size of the roster the run was started with.
    pub fn total(&self) -> usize {
        self.queue.len() + self.completed.len()
    }

    /// The next character in the queue.
    pub fn next(&self) -> Option<&str> {
        self.queue.first().map(String::as_str)
    }

    /// Whether every character has been completed without failing.
    pub fn is_finished(&self) -> bool {
        self.phase() == RunPhase::Active && self.queue.is_empty()
    }

    /// Share of the roster completed, rounded to a whole percent.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.completed.len() * 100 + total / 2) / total) as u32
    }
}
