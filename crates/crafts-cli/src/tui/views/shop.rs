use crafts_core::filter::display_category;
use crafts_core::model::Product;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::{
    app::{App, InputMode, LoadState, LOAD_FAILED_MESSAGE},
    views::format_price,
    widgets::{category_bar::CategoryBar, search_input::SearchInput},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(3), // search bar
        Constraint::Length(1), // category bar
        Constraint::Length(1), // sort + count
        Constraint::Min(5),    // table
    ])
    .split(area);

    frame.render_widget(
        SearchInput {
            text: &app.filter.search,
            cursor: app.search_cursor,
            focused: app.input_mode == InputMode::Search,
        },
        layout[0],
    );

    frame.render_widget(
        CategoryBar {
            categories: app.category_names(),
            selected_index: app.category_index,
            active: app.input_mode == InputMode::Filter,
        },
        layout[1],
    );

    let mut sort_line = vec![
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.filter.sort.label(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let LoadState::Loaded(all) = &app.products {
        sort_line.push(Span::styled(
            format!("   showing {} of {}", app.visible.len(), all.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Line::from(sort_line), layout[2]);

    render_table(frame, app, layout[3]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    match &app.products {
        LoadState::Loading => {
            let loading = Line::from(vec![Span::styled(
                "  Loading...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]);
            frame.render_widget(Paragraph::new(loading).block(block), area);
            return;
        }
        LoadState::Failed => {
            let failed = vec![
                Line::from(Span::styled(
                    format!("  {LOAD_FAILED_MESSAGE}"),
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "  Press r to retry.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(failed).block(block), area);
            return;
        }
        LoadState::Loaded(_) => {}
    }

    if app.visible.is_empty() {
        let empty = vec![
            Line::from(Span::styled(
                "  No products found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Press x to clear filters.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(empty).block(block.title(" Products (0) ")),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Title"),
        Cell::from("Category"),
        Cell::from("Price"),
        Cell::from("Rating"),
        Cell::from("Deal"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = app.visible.iter().map(make_product_row).collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(format!(" Products ({}) ", app.visible.len())))
        .row_highlight_style(
            Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn make_product_row(product: &Product) -> Row<'static> {
    let title_cell = Cell::from(truncate(&product.title, 60));
    let category_cell = Cell::from(Span::styled(
        display_category(&product.category),
        Style::default().fg(Color::Magenta),
    ));
    let price_cell = Cell::from(Span::styled(
        format_price(product.price),
        Style::default().fg(Color::Green),
    ));
    let rating_cell = Cell::from(Span::styled(
        format!("★ {:.1}", product.rating),
        Style::default().fg(rating_color(product.rating)),
    ));
    let deal_cell = match product.discount_badge() {
        Some(pct) => Cell::from(Span::styled(
            format!("{pct}% OFF"),
            Style::default().fg(Color::Yellow),
        )),
        None => Cell::from(""),
    };

    Row::new(vec![
        title_cell,
        category_cell,
        price_cell,
        rating_cell,
        deal_cell,
    ])
}

/// Compact one-line rendering used by the home page's featured list.
pub fn product_spans(product: &Product) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(
            truncate(&product.title, 40),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_price(product.price),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("★ {:.1}", product.rating),
            Style::default().fg(rating_color(product.rating)),
        ),
    ];
    if let Some(pct) = product.discount_badge() {
        spans.push(Span::styled(
            format!("  {pct}% OFF"),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans
}

fn rating_color(rating: f64) -> Color {
    if rating >= 4.5 {
        Color::Green
    } else if rating >= 3.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        text.to_string()
    }
}
