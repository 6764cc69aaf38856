//! Code listing pane with syntax highlighting
//!
//! This module renders the algorithm's code listing and marks the line the
//! current step points at.
//!
//! # Features
//!
//! - Syntax highlighting for keywords, primitive types, numbers and comments
//! - Current line highlighting with an arrow indicator
//! - The current line is kept at a fixed visual row while stepping
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use super::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the code listings
fn highlight_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to the end of the line
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let style = word_style(&current_word, c == '(');
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '&' | '!' => Style::default().fg(DEFAULT_THEME.keyword),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str, is_function: bool) -> Style {
    match word {
        "i64" | "u64" | "usize" | "f64" | "bool" | "Vec" | "VecDeque" | "Option" | "Some"
        | "None" | "Graph" | "Self" => Style::default().fg(DEFAULT_THEME.type_name),
        "fn" | "let" | "mut" | "if" | "else" | "while" | "for" | "in" | "loop" | "return"
        | "break" | "continue" | "match" | "as" | "true" | "false" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the code pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

/// Render the code listing; `current_line` is 1-based, `None` when the step
/// points at no line
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    code: &str,
    current_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = code.lines().collect();
    let total_lines = lines.len();

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if let Some(line) = current_line.filter(|&l| l > 0 && l <= total_lines) {
        scroll_state.offset = (line - 1).saturating_sub(target_row);
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = current_line == Some(line_num);

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_code(line);
            if is_current {
                let current_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(current_bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text() {
        let source = "    let mid = (low + high) / 2; // midpoint";
        let line = highlight_code(source);
        let rebuilt: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_keyword_styles() {
        assert_eq!(word_style("while", false).fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(word_style("usize", false).fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(word_style("42", false).fg, Some(DEFAULT_THEME.number));
        assert_eq!(word_style("partition", true).fg, Some(DEFAULT_THEME.function));
    }
}
