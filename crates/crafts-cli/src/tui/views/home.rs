use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, LoadState};
use crate::tui::views::shop::product_spans;

const FEATURED_FAILED_MESSAGE: &str = "Failed to load featured products. Please try again later.";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(9), // hero
        Constraint::Min(5),    // featured products
    ])
    .split(area);

    render_hero(frame, app, layout[0]);
    render_featured(frame, app, layout[1]);
}

fn render_hero(frame: &mut Frame, app: &App, area: Rect) {
    let [center] = Layout::horizontal([Constraint::Max(72)])
        .flex(Flex::Center)
        .areas(area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Discover ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "Unique Crafts",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " for Your Collection",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Explore our curated selection of handmade, vintage, and unique items \
             that you won't find in mainstream stores.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Shop Now ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  press Enter  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("press a to ask the {}", app.assistant_name),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), center);
}

fn render_featured(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Featured Products ");

    let lines: Vec<Line> = match &app.featured {
        LoadState::Loading => vec![Line::from(Span::styled(
            "  Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))],
        LoadState::Failed => vec![Line::from(Span::styled(
            format!("  {FEATURED_FAILED_MESSAGE}"),
            Style::default().fg(Color::Red),
        ))],
        LoadState::Loaded(products) if products.is_empty() => vec![Line::from(Span::styled(
            "  No featured products right now.",
            Style::default().fg(Color::DarkGray),
        ))],
        LoadState::Loaded(products) => products
            .iter()
            .map(|p| {
                let mut spans = vec![Span::raw("  ")];
                spans.extend(product_spans(p));
                Line::from(spans)
            })
            .collect(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
