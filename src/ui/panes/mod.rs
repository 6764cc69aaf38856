//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI.
//!
//! # Pane Modules
//!
//! - [`array`]: Bar chart of the current array buffer, colored by highlight role
//! - [`graph`]: Canvas drawing of the graph fixture with visited/path/current nodes
//! - [`source`]: Code listing with syntax highlighting and the current line indicator
//! - [`details`]: Algorithm metadata, cumulative counters and the step narration
//! - [`status`]: Status bar with keybindings and playback state
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function taking the frame, its
//! area and borrowed read-only data. Only the source pane keeps scroll state
//! between frames.

pub mod array;
pub mod details;
pub mod graph;
pub mod source;
pub mod status;

use crate::trace::Highlights;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Color, Modifier, Style};

// Re-export render functions for convenience
pub use array::render_array_pane;
pub use details::{render_details_pane, DetailsRenderData};
pub use graph::render_graph_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};

/// Color of array position or node `index` under the strongest role it holds
pub(crate) fn role_color(highlights: &Highlights, index: usize) -> Option<Color> {
    if highlights.found == Some(index) {
        Some(DEFAULT_THEME.found)
    } else if highlights.swapping.contains(&index) {
        Some(DEFAULT_THEME.swapping)
    } else if highlights.comparing.contains(&index) {
        Some(DEFAULT_THEME.comparing)
    } else if highlights.pivot == Some(index) {
        Some(DEFAULT_THEME.pivot)
    } else if highlights.current == Some(index) {
        Some(DEFAULT_THEME.current)
    } else if highlights.path.contains(&index) {
        Some(DEFAULT_THEME.path)
    } else if highlights.sorted.contains(&index) {
        Some(DEFAULT_THEME.sorted)
    } else if highlights.visited.contains(&index) {
        Some(DEFAULT_THEME.visited)
    } else {
        None
    }
}

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
