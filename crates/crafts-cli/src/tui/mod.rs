pub mod app;
pub mod event;
pub(crate) mod views;
mod widgets;

use std::time::{Duration, Instant};

use anyhow::Result;
use crafts_core::catalog::{CatalogClient, CatalogSource};
use crafts_core::config::CraftsConfig;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc;

use self::app::{App, Panel, Screen};
use self::event::{AsyncAction, AsyncResult};
use self::widgets::{header::Header, help_bar::HelpBar};

/// Entry point for the interactive storefront.
pub async fn run_tui(config: &CraftsConfig) -> Result<()> {
    let client = CatalogClient::from_config(&config.catalog);
    let featured_limit = config.catalog.featured_limit;

    // Channels for async communication
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    // Spawn async worker
    tokio::spawn(async move {
        worker_loop(&client, featured_limit, &mut action_rx, &result_tx).await;
    });

    let mut app = App::new(config);
    if let Some(action) = app.load_current() {
        action_tx.send(action)?;
    }

    // Initialize terminal
    let mut terminal = ratatui::init();

    let result = run_loop(&mut terminal, &mut app, &action_tx, &mut result_rx);

    // Restore terminal
    ratatui::restore();

    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        // Poll for async results (non-blocking)
        while let Ok(result) = result_rx.try_recv() {
            app.handle_result(result);
        }

        // Poll for keyboard events (50ms timeout for responsive UI)
        if ct_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        let _ = action_tx.send(action);
                    }
                }
            }
        }

        // Deliver due chat replies, age the toast
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::vertical([
        Constraint::Length(3), // header
        Constraint::Min(5),    // page
        Constraint::Length(1), // help bar
    ])
    .split(frame.area());

    frame.render_widget(
        Header {
            store_name: &app.store_name,
            screen: app.screen,
            cart_count: app.cart.item_count(),
            cart_open: app.panel == Panel::Cart,
        },
        layout[0],
    );

    match app.screen {
        Screen::Home => views::home::render(frame, app, layout[1]),
        Screen::Shop => views::shop::render(frame, app, layout[1]),
        Screen::About => views::about::render(frame, app, layout[1]),
    }

    match app.panel {
        Panel::Cart => views::cart::render(frame, app, layout[1]),
        Panel::Chat => views::chat::render(frame, app, layout[1]),
        Panel::None => {}
    }

    frame.render_widget(
        HelpBar {
            screen: app.screen,
            panel: app.panel,
            input_mode: &app.input_mode,
        },
        layout[2],
    );

    if let Some(ref msg) = app.notice {
        render_notice_toast(frame, msg);
    }
}

fn render_notice_toast(frame: &mut Frame, msg: &str) {
    use ratatui::{
        layout::Flex,
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(50)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(format!(" ✓ {msg}"))
        .style(Style::default().fg(Color::Black).bg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(toast, toast_area);
}

/// Async worker loop: runs catalog requests one at a time and reports each
/// outcome with the generation it was requested under.
async fn worker_loop<S: CatalogSource>(
    source: &S,
    featured_limit: usize,
    action_rx: &mut mpsc::UnboundedReceiver<AsyncAction>,
    result_tx: &mpsc::UnboundedSender<AsyncResult>,
) {
    while let Some(action) = action_rx.recv().await {
        let results = match action {
            AsyncAction::LoadFeatured { generation } => vec![AsyncResult::Featured {
                generation,
                result: source
                    .fetch_products(featured_limit)
                    .await
                    .map_err(|e| e.to_string()),
            }],
            AsyncAction::LoadShop { generation, limit } => {
                let products = source.fetch_products(limit).await.map_err(|e| e.to_string());
                let categories = source.fetch_categories().await.map_err(|e| e.to_string());
                vec![
                    AsyncResult::Products {
                        generation,
                        result: products,
                    },
                    AsyncResult::Categories {
                        generation,
                        result: categories,
                    },
                ]
            }
        };
        for result in results {
            if result_tx.send(result).is_err() {
                return; // UI closed
            }
        }
    }
}
