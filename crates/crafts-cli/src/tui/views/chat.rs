use chrono::Local;
use crafts_core::model::{ChatMessage, Sender};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

/// Chat window anchored to the bottom-right corner.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [column] = Layout::horizontal([Constraint::Max(60)])
        .flex(Flex::End)
        .areas(area);
    let [window] = Layout::vertical([Constraint::Max(24)])
        .flex(Flex::End)
        .areas(column);

    frame.render_widget(Clear, window);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", app.assistant_name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(window);
    frame.render_widget(block, window);

    let layout = Layout::vertical([
        Constraint::Min(3),    // transcript
        Constraint::Length(3), // input
    ])
    .split(inner);

    // Transcript
    let mut lines: Vec<Line> = Vec::new();
    for message in app.chat.messages() {
        lines.extend(message_lines(message));
    }
    if app.chat.is_typing() {
        lines.push(Line::from(Span::styled(
            "Assistant is typing…",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest messages in view: scroll so the last line is at the bottom.
    let scroll = wrapped_rows(&lines, layout[0].width).saturating_sub(layout[0].height);
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, layout[0]);

    // Input field
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let input = if app.chat_input.is_empty() {
        Paragraph::new(Span::styled(
            "Type your message...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(app.chat_input.as_str())
    };
    frame.render_widget(input.block(input_block), layout[1]);

    let cursor_x = layout[1].x + 1 + app.chat_input.chars().count() as u16;
    let cursor_y = layout[1].y + 1;
    frame.set_cursor_position((cursor_x.min(layout[1].right().saturating_sub(2)), cursor_y));
}

/// Rows `lines` occupy once wrapped at `width` columns. Word wrapping can
/// only add rows, so this may undershoot slightly for long words.
fn wrapped_rows(lines: &[Line], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = usize::from(width);
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'_>> {
    let (color, indent) = match message.sender {
        Sender::Bot => (Color::Cyan, ""),
        Sender::User => (Color::Magenta, "  "),
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    vec![
        Line::from(vec![
            Span::raw(indent),
            Span::styled(
                format!("{} • {time}", message.sender),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![Span::raw(indent), Span::raw(message.text.as_str())]),
        Line::from(""),
    ]
}
