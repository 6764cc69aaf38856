//! Status bar rendering with keybindings and playback state

use crate::playback::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub is_error: bool,
    pub current_index: usize,
    pub total_steps: usize,
    pub phase: Phase,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Left side: step position and status message
    let step_text = if data.total_steps == 0 {
        " Step 0/0 ".to_string()
    } else {
        format!(" Step {}/{} ", data.current_index + 1, data.total_steps)
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let keybinds = [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ↵ / ⌫ ", " end/start "),
        (" +/- ", " speed "),
        (" ⇥ ", " algorithm "),
        (" g 1-4 [ ] ", " input "),
        ("q", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in keybinds.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let badge = match data.phase {
        Phase::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Phase::Finished => Some((" END ", DEFAULT_THEME.error)),
        Phase::Paused => Some((" PAUSED ", DEFAULT_THEME.comparing)),
        Phase::Ready => Some((" START ", DEFAULT_THEME.success)),
        Phase::Idle => None,
    };

    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
