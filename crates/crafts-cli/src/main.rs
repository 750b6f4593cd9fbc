mod tui;

use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crafts_core::catalog::{CatalogClient, CatalogSource};
use crafts_core::chat::{self, Chat, Submit};
use crafts_core::config::CraftsConfig;
use crafts_core::filter::{self, display_category};
use crafts_core::model::*;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::tui::views::shop::truncate;

#[derive(Parser)]
#[command(
    name = "crafts",
    about = "CuratedCrafts: a terminal storefront for handmade goods",
    version
)]
struct Cli {
    /// Override the catalog API root (default from config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive storefront (default)
    Tui,
    /// List products, filtered and sorted like the shop page
    Products {
        /// Only this category (as returned by `crafts categories`)
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive match on title, description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order (default, price-low, price-high, rating)
        #[arg(long, default_value = "default")]
        sort: SortKey,
        /// How many products to fetch, at least 1 (default from config)
        #[arg(short, long)]
        limit: Option<NonZeroUsize>,
        /// Output raw JSON instead of table
        #[arg(long)]
        json: bool,
    },
    /// List product categories
    Categories {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the home page's featured products
    Featured {
        /// Output raw JSON instead of table
        #[arg(long)]
        json: bool,
    },
    /// Ask the store assistant a single question
    Ask {
        /// Your question
        text: Vec<String>,
    },
    /// Chat with the store assistant on stdin (Ctrl+D to leave)
    Chat,
    /// Print the resolved configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let mut config = CraftsConfig::load(Some(&std::env::current_dir()?)).unwrap_or_else(|e| {
        tracing::warn!("ignoring config files: {e}");
        CraftsConfig::default_config()
    });
    if let Some(base_url) = cli.base_url {
        config.catalog.base_url = base_url;
        config.validate();
    }

    run(cli.command.unwrap_or(Command::Tui), &config).await
}

async fn run(command: Command, config: &CraftsConfig) -> Result<()> {
    match command {
        Command::Tui => tui::run_tui(config).await,
        Command::Products {
            category,
            search,
            sort,
            limit,
            json,
        } => {
            let client = CatalogClient::from_config(&config.catalog);
            let state = FilterState::default()
                .with_category(category.as_deref().unwrap_or_default())
                .with_search(search.unwrap_or_default())
                .with_sort(sort);
            let limit = limit.map_or(config.catalog.product_limit, NonZeroUsize::get);
            cmd_products(&client, &state, limit, json).await
        }
        Command::Categories { json } => {
            let client = CatalogClient::from_config(&config.catalog);
            cmd_categories(&client, json).await
        }
        Command::Featured { json } => {
            let client = CatalogClient::from_config(&config.catalog);
            let products = client
                .fetch_featured()
                .await
                .context("failed to fetch featured products")?;
            print_products(&products, products.len(), json)
        }
        Command::Ask { text } => cmd_ask(&text.join(" ")),
        Command::Chat => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut chat = Chat::new(config.chat.typing_delay());
            chat_session(&mut chat, stdin.lock(), &mut stdout.lock()).await
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// products / categories
// ---------------------------------------------------------------------------

async fn cmd_products<S: CatalogSource>(
    source: &S,
    state: &FilterState,
    limit: usize,
    json: bool,
) -> Result<()> {
    let products = source
        .fetch_products(limit)
        .await
        .context("failed to fetch products")?;
    let visible = filter::apply(&products, state);
    print_products(&visible, products.len(), json)
}

async fn cmd_categories<S: CatalogSource>(source: &S, json: bool) -> Result<()> {
    let categories = source
        .fetch_categories()
        .await
        .context("failed to fetch categories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("{}", "No categories found.".dimmed());
        return Ok(());
    }

    for name in &categories {
        println!("{:<28} {}", display_category(name), name.dimmed());
    }
    Ok(())
}

fn print_products(products: &[Product], fetched: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("{}", "No products found.".dimmed());
        return Ok(());
    }

    println!(
        "{:<5} {:<40} {:<20} {:>10} {:>6}  {}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Category".dimmed(),
        "Price".dimmed(),
        "Rating".dimmed(),
        "Deal".dimmed()
    );
    for p in products {
        let rating = format!("{:>6.1}", p.rating);
        let rating = if p.rating >= 4.5 {
            rating.green().to_string()
        } else if p.rating >= 3.5 {
            rating.yellow().to_string()
        } else {
            rating.red().to_string()
        };
        let deal = p
            .discount_badge()
            .map(|pct| format!("{pct}% OFF").yellow().to_string())
            .unwrap_or_default();
        println!(
            "{:<5} {:<40} {:<20} {:>10} {}  {}",
            p.id.to_string().cyan(),
            truncate(&p.title, 40),
            display_category(&p.category).magenta(),
            format!("${:.2}", p.price).green(),
            rating,
            deal
        );
    }
    println!(
        "\n{}",
        format!("Showing {} of {} products", products.len(), fetched).dimmed()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// ask / chat
// ---------------------------------------------------------------------------

fn cmd_ask(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("ask needs a question, e.g. `crafts ask do you ship abroad?`");
    }
    println!("{}", chat::respond(text));
    Ok(())
}

/// Line-based chat: every non-blank input line is answered after the
/// configured typing delay.
async fn chat_session<R: BufRead, W: Write>(
    chat: &mut Chat,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut shown = print_new_messages(chat, 0, out)?;

    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        if let Submit::Rejected = chat.submit(&line, Instant::now()) {
            continue;
        }
        // The user's own line is already on the terminal.
        shown += 1;

        while let Some(due) = chat.next_due() {
            tokio::time::sleep_until(due.into()).await;
            chat.poll(Instant::now());
        }
        shown = print_new_messages(chat, shown, out)?;
    }
    Ok(())
}

fn print_new_messages<W: Write>(chat: &Chat, shown: usize, out: &mut W) -> Result<usize> {
    let messages = chat.messages();
    for message in &messages[shown.min(messages.len())..] {
        let time = message
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M");
        writeln!(
            out,
            "{} {}",
            format!("{} • {time}", message.sender).cyan(),
            message.text
        )?;
    }
    out.flush()?;
    Ok(messages.len())
}
