//! The run lifecycle state machine.
//!
//! ```text
//!            start_run                 fail_run
//!   Idle ─────────────────▶ Active ─────────────▶ Failed
//!    ▲                      │  ▲ complete_character  │
//!    │                      └──┘                     │
//!    └────────────── reset_run ◀─────────────────────┘
//! ```
//!
//! `start_run` is legal from every phase and replaces whatever run was
//! there. Every operation runs to completion under one lock, so concurrent
//! callers always observe a consistent queue/completed partition.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock, seed_from_clock};
use crate::config::TrackerConfig;
use crate::error::{RunError, RunResult};
use crate::roster;
use crate::state::{RunPhase, RunState};

struct Inner {
    state: RunState,
    /// Highest run id ever issued. Survives resets.
    last_run_id: u64,
}

/// Owner of the single tracked run.
///
/// Share it between callers with an `Arc`; all methods take `&self`.
pub struct RunTracker {
    inner: Mutex<Inner>,
    config: TrackerConfig,
    clock: Arc<dyn Clock>,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl RunTracker {
    /// Create an idle tracker using the system clock.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an idle tracker with an explicit time source.
    pub fn with_clock(config: TrackerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: RunState::default(),
                last_run_id: 0,
            }),
            config,
            clock,
        }
    }

    /// The tracker's configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Pick the seed for a shuffle: the explicit one, else the configured
    /// one, else the current time.
    pub fn resolve_seed(&self, seed: Option<u64>) -> u64 {
        seed.or(self.config.seed)
            .unwrap_or_else(|| seed_from_clock(self.clock.as_ref()))
    }

    /// Snapshot of the current run.
    pub fn get_run_state(&self) -> RunState {
        let state = self.inner.lock().state.clone();
        debug!(run_id = state.run_id, phase = %state.phase(), "read run state");
        state
    }

    /// Start a new run over `characters`, discarding any current run.
    ///
    /// The queue is `characters` shuffled with `seed` (or a derived seed).
    /// The new run id is one past the highest id ever issued.
    pub fn start_run(&self, characters: Vec<String>, seed: Option<u64>) -> RunResult<RunState> {
        if let Err(err) = roster::validate(&characters) {
            return Err(rejected("start_run", err));
        }

        let seed = self.resolve_seed(seed);
        let order = ar_shuffle::shuffled_indices(characters.len(), seed);
        let queue = ar_shuffle::permute(&characters, &order);

        let mut inner = self.inner.lock();
        let now = self.clock.now_ms();
        inner.last_run_id += 1;
        inner.state = RunState {
            run_id: inner.last_run_id,
            queue,
            completed: Vec::new(),
            failed: false,
            started_at_ms: Some(now),
            updated_at_ms: Some(now),
        };

        info!(
            run_id = inner.state.run_id,
            characters = inner.state.queue.len(),
            seed,
            "run started"
        );
        Ok(inner.state.clone())
    }

    /// Shuffle `0..len` independently of the run, returning the order and
    /// the seed used. Lengths above [`ar_shuffle::MAX_SHUFFLE_LEN`] are
    /// rejected.
    pub fn shuffle_characters(
        &self,
        len: usize,
        seed: Option<u64>,
    ) -> RunResult<(Vec<usize>, u64)> {
        if len > ar_shuffle::MAX_SHUFFLE_LEN {
            let err = RunError::ShuffleTooLong {
                len,
                max: ar_shuffle::MAX_SHUFFLE_LEN,
            };
            return Err(rejected("shuffle_characters", err));
        }

        let seed = self.resolve_seed(seed);
        debug!(len, seed, "shuffling characters");
        Ok((ar_shuffle::shuffled_indices(len, seed), seed))
    }

    /// Start a new run over the configured roster.
    pub fn start_default_run(&self, seed: Option<u64>) -> RunResult<RunState> {
        self.start_run(self.config.roster.clone(), seed)
    }

    /// Move a character from the queue to the completed list.
    ///
    /// With `Some(name)` any queued character may be completed; with `None`
    /// the front of the queue is.
    pub fn complete_character(&self, character: Option<&str>) -> RunResult<RunState> {
        let mut inner = self.inner.lock();
        let state = &mut inner.state;

        let index = match queue_position(state, character) {
            Ok(index) => index,
            Err(err) => return Err(rejected("complete_character", err)),
        };

        let finished = state.queue.remove(index);
        state.updated_at_ms = Some(self.clock.now_ms());
        info!(
            run_id = state.run_id,
            character = %finished,
            remaining = state.queue.len(),
            "character completed"
        );
        state.completed.push(finished);

        if state.queue.is_empty() {
            info!(run_id = state.run_id, "run finished");
        }
        Ok(state.clone())
    }

    /// Mark the current run as failed, freezing its progress.
    pub fn fail_run(&self) -> RunResult<RunState> {
        let mut inner = self.inner.lock();
        let state = &mut inner.state;

        match state.phase() {
            RunPhase::Idle => return Err(rejected("fail_run", RunError::NoActiveRun)),
            RunPhase::Failed => return Err(rejected("fail_run", RunError::AlreadyFailed)),
            RunPhase::Active => {}
        }

        state.failed = true;
        state.updated_at_ms = Some(self.clock.now_ms());
        info!(
            run_id = state.run_id,
            completed = state.completed.len(),
            "run failed"
        );
        Ok(state.clone())
    }

    /// Discard the current run and return to idle.
    ///
    /// The run id sequence is not reset; the next run continues from the
    /// highest id issued so far.
    pub fn reset_run(&self) -> RunResult<RunState> {
        let mut inner = self.inner.lock();
        if inner.state.phase() == RunPhase::Idle {
            return Err(rejected("reset_run", RunError::NoActiveRun));
        }

        let previous = inner.state.run_id;
        inner.state = RunState::default();
        info!(run_id = previous, "run reset");
        Ok(inner.state.clone())
    }
}

/// Where `character` sits in the queue, if completing it is legal.
fn queue_position(state: &RunState, character: Option<&str>) -> RunResult<usize> {
    match state.phase() {
        RunPhase::Idle => return Err(RunError::NoActiveRun),
        RunPhase::Failed => return Err(RunError::RunFailed),
        RunPhase::Active => {}
    }

    match character {
        Some(name) => state
            .queue
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                if state.completed.iter().any(|c| c == name) {
                    RunError::AlreadyCompleted(name.to_string())
                } else {
                    RunError::UnknownCharacter(name.to_string())
                }
            }),
        None if state.queue.is_empty() => Err(RunError::RunFinished),
        None => Ok(0),
    }
}

fn rejected(operation: &'static str, err: RunError) -> RunError {
    warn!(operation, kind = %err.kind(), error = %err, "run operation rejected");
    err
}
