//! Graph pane: the fixture drawn on a braille canvas
//!
//! Node coordinates are in fixture space (origin top-left); the canvas origin
//! is bottom-left, so y is flipped when drawing.

use super::{border_style, role_color};
use crate::trace::{GraphFrame, Highlights};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

const MARGIN: f64 = 60.0;

fn node_tag(frame: &GraphFrame, id: usize) -> String {
    let label = frame.graph.label(id);
    match frame.distances.as_ref().map(|d| d.get(id).copied().flatten()) {
        Some(Some(distance)) => format!("{}:{}", label, distance),
        Some(None) => format!("{}:∞", label),
        None => label.to_string(),
    }
}

pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    graph_frame: &GraphFrame,
    highlights: &Highlights,
) {
    let graph = &graph_frame.graph;
    let max_x = graph.nodes.iter().map(|n| n.x).fold(0.0, f64::max) + MARGIN;
    let max_y = graph.nodes.iter().map(|n| n.y).fold(0.0, f64::max) + MARGIN;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(border_style(false)),
        )
        .background_color(DEFAULT_THEME.bg)
        .marker(Marker::Braille)
        .x_bounds([0.0, max_x])
        .y_bounds([0.0, max_y])
        .paint(|ctx| {
            for edge in &graph.edges {
                let (Some(from), Some(to)) = (graph.nodes.get(edge.from), graph.nodes.get(edge.to))
                else {
                    continue;
                };
                let relaxing = highlights.comparing.contains(&edge.from)
                    && highlights.comparing.contains(&edge.to);
                ctx.draw(&CanvasLine {
                    x1: from.x,
                    y1: max_y - from.y,
                    x2: to.x,
                    y2: max_y - to.y,
                    color: if relaxing {
                        DEFAULT_THEME.comparing
                    } else {
                        DEFAULT_THEME.border_normal
                    },
                });
                ctx.print(
                    (from.x + to.x) / 2.0,
                    max_y - (from.y + to.y) / 2.0,
                    Span::styled(
                        edge.weight.to_string(),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                );
            }

            ctx.layer();

            for node in &graph.nodes {
                let color = role_color(highlights, node.id).unwrap_or(DEFAULT_THEME.fg);
                ctx.draw(&Circle {
                    x: node.x,
                    y: max_y - node.y,
                    radius: 18.0,
                    color,
                });
                ctx.print(
                    node.x - 8.0,
                    max_y - node.y,
                    Span::styled(
                        node_tag(graph_frame, node.id),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::graph::Graph;
    use std::sync::Arc;

    #[test]
    fn test_node_tag_shows_distances() {
        let graph = Arc::new(Graph::sample());
        let plain = GraphFrame {
            graph: Arc::clone(&graph),
            distances: None,
        };
        assert_eq!(node_tag(&plain, 0), "A");

        let weighted = GraphFrame {
            graph,
            distances: Some(vec![Some(0), None, None, None, None, None]),
        };
        assert_eq!(node_tag(&weighted, 0), "A:0");
        assert_eq!(node_tag(&weighted, 1), "B:∞");
    }
}
