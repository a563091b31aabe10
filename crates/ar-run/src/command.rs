//! Serializable requests and responses for UI bridges.
//!
//! Requests are JSON objects tagged by `op`:
//!
//! ```json
//! {"op": "start_run", "characters": ["Kragg", "Etalus"], "seed": 42}
//! {"op": "complete_character", "character": "Kragg"}
//! {"op": "shuffle_characters", "len": 14}
//! ```
//!
//! Every response carries `ok`. Successes hold a `state` snapshot (or an
//! `order` and `seed` for shuffles); failures hold an `error` with a `kind`
//! and a `message`, so a rejected request is never mistaken for an
//! unchanged state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ErrorKind, RunError};
use crate::state::RunState;
use crate::tracker::RunTracker;

/// One operation requested by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Read the current run.
    GetRunState,
    /// Start a new run. Without `characters` the configured roster is used.
    StartRun {
        /// Roster for the run.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        characters: Option<Vec<String>>,
        /// Shuffle seed for the queue.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    /// Complete a character, or the front of the queue when omitted.
    CompleteCharacter {
        /// Character to complete.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        character: Option<String>,
    },
    /// Mark the run as failed.
    FailRun,
    /// Discard the run.
    ResetRun,
    /// Shuffle `0..len`, independent of any run.
    ShuffleCharacters {
        /// Number of indices to permute.
        len: usize,
        /// Shuffle seed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl Request {
    /// Parse a request from a JSON string.
    pub fn parse(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// The request's operation name.
    pub fn op(&self) -> &'static str {
        match self {
            Self::GetRunState => "get_run_state",
            Self::StartRun { .. } => "start_run",
            Self::CompleteCharacter { .. } => "complete_character",
            Self::FailRun => "fail_run",
            Self::ResetRun => "reset_run",
            Self::ShuffleCharacters { .. } => "shuffle_characters",
        }
    }
}

/// Why a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Bad roster or character name.
    InvalidInput,
    /// Not allowed in the run's current phase.
    IllegalTransition,
    /// There is no run to act on.
    NoActiveRun,
    /// The request itself could not be understood.
    BadRequest,
}

impl From<ErrorKind> for FailureKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => Self::InvalidInput,
            ErrorKind::IllegalTransition => Self::IllegalTransition,
            ErrorKind::NoActiveRun => Self::NoActiveRun,
        }
    }
}

/// Details of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human readable description.
    pub message: String,
}

/// The outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum Response {
    /// A run operation succeeded.
    State(RunState),
    /// A shuffle succeeded.
    Shuffle {
        /// The permutation of `0..len`.
        order: Vec<usize>,
        /// The seed actually used.
        seed: u64,
    },
    /// The request was rejected; nothing changed.
    Rejected(Failure),
}

impl Response {
    /// A response for input that did not parse as a request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Rejected(Failure {
            kind: FailureKind::BadRequest,
            message: message.into(),
        })
    }

    /// Whether the request succeeded.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

impl From<RunError> for Failure {
    fn from(err: RunError) -> Self {
        Self {
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }
}

impl From<Result<RunState, RunError>> for Response {
    fn from(result: Result<RunState, RunError>) -> Self {
        match result {
            Ok(state) => Self::State(state),
            Err(err) => Self::Rejected(err.into()),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireResponse {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<RunState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Failure>,
}

impl From<Response> for WireResponse {
    fn from(response: Response) -> Self {
        let mut wire = WireResponse {
            ok: response.is_ok(),
            state: None,
            order: None,
            seed: None,
            error: None,
        };
        match response {
            Response::State(state) => wire.state = Some(state),
            Response::Shuffle { order, seed } => {
                wire.order = Some(order);
                wire.seed = Some(seed);
            }
            Response::Rejected(failure) => wire.error = Some(failure),
        }
        wire
    }
}

impl TryFrom<WireResponse> for Response {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, String> {
        match wire {
            WireResponse {
                ok: false,
                error: Some(failure),
                ..
            } => Ok(Self::Rejected(failure)),
            WireResponse {
                ok: true,
                state: Some(state),
                ..
            } => Ok(Self::State(state)),
            WireResponse {
                ok: true,
                order: Some(order),
                seed: Some(seed),
                ..
            } => Ok(Self::Shuffle { order, seed }),
            _ => Err("response has neither a state, an order, nor an error".to_string()),
        }
    }
}

impl RunTracker {
    /// Execute a request against this tracker.
    pub fn handle(&self, request: Request) -> Response {
        debug!(op = request.op(), "handling request");
        match request {
            Request::GetRunState => Response::State(self.get_run_state()),
            Request::StartRun { characters, seed } => match characters {
                Some(characters) => self.start_run(characters, seed).into(),
                None => self.start_default_run(seed).into(),
            },
            Request::CompleteCharacter { character } => {
                self.complete_character(character.as_deref()).into()
            }
            Request::FailRun => self.fail_run().into(),
            Request::ResetRun => self.reset_run().into(),
            Request::ShuffleCharacters { len, seed } => {
                match self.shuffle_characters(len, seed) {
                    Ok((order, seed)) => Response::Shuffle { order, seed },
                    Err(err) => Response::Rejected(err.into()),
                }
            }
        }
    }

    /// Parse and execute one JSON request, producing a response even for
    /// malformed input.
    pub fn handle_json(&self, input: &str) -> Response {
        match Request::parse(input) {
            Ok(request) => self.handle(request),
            Err(err) => Response::bad_request(err.to_string()),
        }
    }
}
