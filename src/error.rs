//! Error types for input preparation, trace materialization and playback
//!
//! Nothing in the core is fatal. Every error here is returned to the caller,
//! leaves prior state untouched, and can be shown as a status message.
//!
//! Two conditions are deliberately *not* errors:
//! - an unknown algorithm id materializes to an empty [`Trace`](crate::trace::Trace)
//! - playback commands on an empty trace are no-ops

use crate::algorithms::InputKind;
use thiserror::Error;

/// Errors raised while preparing raw input data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Requested array size is outside the configured bounds
    #[error("input size {size} is outside the allowed range {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    /// Shape name did not match any known array shape
    #[error("unknown input shape '{0}' (expected random, sorted, reversed or nearly-sorted)")]
    UnknownShape(String),

    /// Algorithm id is not in the registry
    #[error("unknown algorithm '{0}' (see --list)")]
    UnknownAlgorithm(String),

    /// Traversal start node does not exist in the graph
    #[error("start node {start} does not exist (graph has {nodes} nodes)")]
    StartNodeOutOfRange { start: usize, nodes: usize },
}

/// Errors raised by the materializer before any step is generated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Input is larger than the materializer will expand into a trace
    #[error("input of length {len} exceeds the trace limit of {max}")]
    InvalidInput { len: usize, max: usize },

    /// Input variant does not match what the algorithm consumes
    #[error("algorithm '{algorithm}' expects {expected} input")]
    InputMismatch {
        algorithm: &'static str,
        expected: InputKind,
    },

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors raised by playback commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Command is only accepted while playback is stopped
    #[error("cannot {command} while playing; pause first")]
    WhilePlaying { command: &'static str },

    /// Auto-advance interval outside the configured bounds
    #[error("speed {speed}ms is outside the allowed range {min}..={max}ms")]
    SpeedOutOfRange { speed: u64, min: u64, max: u64 },

    #[error(transparent)]
    Trace(#[from] TraceError),
}
