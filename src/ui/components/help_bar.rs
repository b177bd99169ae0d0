//! Footer bar with key hints and a status line.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render the key hints for `context` on the left and `status` on the right.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, status: &str) {
    let status_width = (status.chars().count() as u16 + 1).min(area.width / 2);
    let [hints_area, status_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(status_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(hint_spans(get_context_hints(context)))),
        hints_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status.to_string(), Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Right),
        status_area,
    );
}

/// Split a hint line into spans, highlighting the bracketed keys.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_descriptions_alternate() {
        let spans = hint_spans("[1-9] sort  [a] all");
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["[1-9]", " sort  ", "[a]", " all"]);
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[1].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_unclosed_bracket_is_plain_text() {
        let spans = hint_spans("[Esc close");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_empty_hints() {
        assert!(hint_spans("").is_empty());
    }
}
