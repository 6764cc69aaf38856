//! Terminal renderer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: owns the [`PlaybackController`], maps keys to playback commands and
//!   drives the auto-advance timer from its event loop
//! - **[`panes`]**: stateless render functions for each visible pane (array bars, graph
//!   canvas, code listing, details, status bar)
//! - **[`theme`]**: centralized color palette, including one color per highlight role
//!
//! Panes only read the current [`Step`]; they never mutate playback state.
//!
//! [`PlaybackController`]: crate::playback::PlaybackController
//! [`Step`]: crate::trace::Step

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
