use crate::chat_message;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(size);

    draw_messages(f, app, chunks[0]);
    app.status.render(f, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn draw_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.conversation.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(chat_message::render(message, area));
    }

    let max = max_scroll(lines.len() as u16, area.height);
    let chat_scroll = effective_scroll(app.scroll, max, app.follow);

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

/// Scroll extent of a message list that is `total_lines` tall inside a
/// viewport of `height` rows.
pub fn max_scroll(total_lines: u16, height: u16) -> u16 {
    total_lines.saturating_sub(height)
}

/// The scroll actually rendered: pinned to the bottom while following,
/// clamped to the extent otherwise.
pub fn effective_scroll(requested: u16, max: u16, follow: bool) -> u16 {
    if follow {
        max
    } else {
        requested.min(max)
    }
}
