use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::{
    app::App,
    views::{format_price, shop::truncate},
};

/// Cart drawer on the right-hand side of the screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [drawer] = Layout::horizontal([Constraint::Max(64)])
        .flex(Flex::End)
        .areas(area);

    frame.render_widget(Clear, drawer);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" Your Cart ({}) ", app.cart.len()));

    if app.cart.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Your cart is empty",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Looks like you haven't added any items to your cart yet.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press Esc to continue shopping.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), drawer);
        return;
    }

    let inner = block.inner(drawer);
    frame.render_widget(block, drawer);

    let layout = Layout::vertical([
        Constraint::Min(3),    // lines
        Constraint::Length(5), // summary
        Constraint::Length(1), // checkout
    ])
    .split(inner);

    let rows: Vec<Row> = app
        .cart
        .lines()
        .map(|line| {
            Row::new(vec![
                Cell::from(truncate(&line.title, 28)),
                Cell::from(Span::styled(
                    format_price(line.price),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(Span::styled(
                    format!("− {} +", line.quantity),
                    Style::default().fg(Color::Cyan),
                )),
                Cell::from(Span::styled(
                    format_price(line.subtotal()),
                    Style::default().fg(Color::Green),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .row_highlight_style(
            Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.cart_selected));
    frame.render_stateful_widget(table, layout[0], &mut state);

    let total = format_price(app.cart.total());
    let label = Style::default().fg(Color::Gray);
    let summary = vec![
        Line::from(Span::styled(
            "─".repeat(layout[1].width as usize),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(" Subtotal  ", label),
            Span::raw(total.clone()),
        ]),
        Line::from(vec![
            Span::styled(" Shipping  ", label),
            Span::styled(
                "Calculated at checkout",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Total     ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                total,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary), layout[1]);

    frame.render_widget(
        Line::from(Span::styled(
            " Proceed to Checkout ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        layout[2],
    );
}
