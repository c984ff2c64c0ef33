use crate::conversation::{Message, Sender};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Projects one message into styled terminal lines: a timestamp
/// header, the wrapped body, and a closing rule.
pub fn render(message: &Message, area: Rect) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let style = base_style(message.sender);
    let indent = indent_for(message.sender);

    render_header(message, &mut lines, style, indent);
    render_content(message, &mut lines, area, style, indent);
    render_footer(&mut lines, style, indent);

    lines
}

/// Strips control characters so hostile text cannot drive the
/// terminal; newlines and tabs survive. The model keeps the raw text,
/// only the projection is cleaned.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn base_style(sender: Sender) -> Style {
    Style::default().fg(match sender {
        Sender::User => Color::Rgb(255, 223, 128),
        Sender::Bot => Color::Rgb(144, 238, 144),
    })
}

fn indent_for(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "  ",
        Sender::Bot => "",
    }
}

fn render_header(
    message: &Message,
    lines: &mut Vec<Line<'static>>,
    style: Style,
    indent: &str,
) {
    let timestamp = message.timestamp.format("%H:%M").to_string();
    let label = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        Span::styled(" ".to_string(), style),
        Span::styled(label.to_string(), style.add_modifier(Modifier::BOLD)),
    ]));
}

fn render_content(
    message: &Message,
    lines: &mut Vec<Line<'static>>,
    area: Rect,
    style: Style,
    indent: &str,
) {
    let wrap_width = (area.width as usize).saturating_sub(4).max(1);
    let cleaned = sanitize(&message.text);

    for wrapped_line in wrap(&cleaned, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped_line.to_string(), style),
        ]));
    }
}

fn render_footer(lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Conversation;

    fn sample_message(text: &str) -> Message {
        let mut conversation = Conversation::new();
        conversation.submit(text).unwrap();
        conversation.messages()[0].clone()
    }

    fn flatten(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.clone()).collect()
    }

    #[test]
    fn test_render_has_header_body_footer() {
        let message = sample_message("hello there");
        let lines = render(&message, Rect::new(0, 0, 40, 10));

        assert_eq!(lines.len(), 3);
        assert!(flatten(&lines[0]).contains("you"));
        assert!(flatten(&lines[1]).contains("hello there"));
        assert!(flatten(&lines[2]).contains("╰─"));
    }

    #[test]
    fn test_long_text_wraps_to_multiple_lines() {
        let message = sample_message(
            "a rather long question that certainly cannot fit on a single narrow line",
        );
        let lines = render(&message, Rect::new(0, 0, 20, 10));
        // header + several body lines + footer
        assert!(lines.len() > 3);
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize("safe\x1b[31mtext\x07"), "safe[31mtext");
        assert_eq!(sanitize("keeps\nnewlines\tand tabs"), "keeps\nnewlines\tand tabs");
    }

    #[test]
    fn test_escape_sequences_never_reach_the_view() {
        let message = sample_message("\x1b]0;owned\x07hi");
        let lines = render(&message, Rect::new(0, 0, 40, 10));
        let body = flatten(&lines[1]);
        assert!(!body.contains('\x1b'));
        assert!(!body.contains('\x07'));
        assert!(body.contains("hi"));
    }
}
