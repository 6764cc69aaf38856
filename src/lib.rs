//! # Introduction
//!
//! algostep runs classic sorting, searching and graph algorithms against
//! concrete inputs, recording a snapshot after every primitive operation.
//! The resulting trace is then played back, paused, stepped and scrubbed
//! through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Generator → Recorder → Trace → PlaybackController → Renderer
//! ```
//!
//! 1. [`input`]: seeded array generation, search preparation and the graph fixture.
//! 2. [`algorithms`]: instrumented generators and the [`algorithms::Registry`]
//!    that names them.
//! 3. [`trace`]: the immutable [`trace::Step`] records and the [`trace::Recorder`]
//!    generators append to.
//! 4. [`materialize`]: drains a generator into a complete [`trace::Trace`].
//! 5. [`playback`]: the play/pause/step state machine over a trace.
//! 6. [`ui`]: ratatui-based renderer; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Sorting: bubble, selection, insertion, heap, quick, merge.
//! Searching: linear, binary, jump.
//! Graph: breadth-first, depth-first, Dijkstra shortest path.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod input;
pub mod materialize;
pub mod playback;
pub mod trace;
pub mod ui;
