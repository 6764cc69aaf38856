//! Array pane: one bar per element, colored by highlight role

use super::{border_style, role_color};
use crate::trace::Highlights;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Width and gap so that `count` bars fill `inner_width` columns
fn bar_geometry(count: usize, inner_width: u16) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let count = count as u16;
    let gap = if inner_width >= count.saturating_mul(3) { 1 } else { 0 };
    let width = inner_width.saturating_sub(gap * count.saturating_sub(1)) / count;
    (width.max(1), gap)
}

pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    values: &[i64],
    highlights: &Highlights,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style(false));

    if values.is_empty() {
        let paragraph = Paragraph::new("(empty input)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let (bar_width, bar_gap) = bar_geometry(values.len(), area.width.saturating_sub(2));
    let show_labels = bar_width >= 2;

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let color = role_color(highlights, index).unwrap_or(DEFAULT_THEME.primary);
            let mut bar = Bar::default()
                .value(value.max(0) as u64)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(DEFAULT_THEME.bg).bg(color))
                .text_value(if show_labels {
                    value.to_string()
                } else {
                    String::new()
                });
            if show_labels {
                bar = bar.label(Line::from(index.to_string()));
            }
            bar
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .label_style(Style::default().fg(DEFAULT_THEME.comment));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_geometry(10, 40), (3, 1));
        assert_eq!(bar_geometry(50, 60), (1, 0));
        assert_eq!(bar_geometry(0, 60), (1, 0));
        assert_eq!(bar_geometry(5, 0), (1, 0));
    }
}
