//! Details pane: algorithm metadata, counters and the current step's narration

use super::border_style;
use crate::algorithms::AlgorithmInfo;
use crate::trace::Counters;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything the details pane shows for one frame
pub struct DetailsRenderData<'a> {
    pub info: &'a AlgorithmInfo,
    pub counters: Counters,
    pub narration: Option<&'a str>,
    /// Human summary of the input, e.g. "20 values, nearly-sorted"
    pub input_summary: &'a str,
    pub speed_ms: u64,
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", name), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

pub fn render_details_pane(frame: &mut Frame, area: Rect, data: &DetailsRenderData) {
    let block = Block::default()
        .title(format!(" {} ", data.info.name))
        .borders(Borders::ALL)
        .border_style(border_style(false));

    let complexity = &data.info.complexity;
    let heading = Style::default()
        .fg(DEFAULT_THEME.function)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            data.info.description,
            Style::default().fg(DEFAULT_THEME.fg),
        )),
        Line::default(),
        field("category", data.info.category.to_string()),
        field("input", data.input_summary.to_string()),
        field("speed", format!("{} ms/step", data.speed_ms)),
        Line::default(),
        Line::from(Span::styled("Complexity", heading)),
        field("best", complexity.best.to_string()),
        field("average", complexity.average.to_string()),
        field("worst", complexity.worst.to_string()),
        field("space", complexity.space.to_string()),
        Line::default(),
        Line::from(Span::styled("Counters", heading)),
        field("comparisons", data.counters.comparisons.to_string()),
        field("swaps", data.counters.swaps.to_string()),
        field("accesses", data.counters.array_accesses.to_string()),
        Line::default(),
    ];

    lines.push(match data.narration {
        Some(text) => Line::from(Span::styled(
            format!("» {}", text),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "(no step)",
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    });

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
