use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

const STORY: &[&str] = &[
    "CuratedCrafts was founded with a passion for bringing unique, handcrafted items to \
     people who appreciate quality and individuality. We believe in supporting artisans \
     and creators while connecting them with customers who value their work.",
    "Our platform showcases items that tell a story, items made with care and attention \
     to detail that you won't find in mainstream stores. Each product in our collection \
     has been carefully selected to ensure quality, uniqueness, and authenticity.",
];

const VALUES: &[(&str, &str)] = &[
    (
        "Passion",
        "We're passionate about unique crafts and connecting artisans with appreciative customers.",
    ),
    (
        "Quality",
        "We carefully curate every item to ensure exceptional quality and authentic craftsmanship.",
    ),
    (
        "Community",
        "We believe in building a community that values creativity, sustainability, and ethical production.",
    ),
];

const FAQ: &[(&str, &str)] = &[
    (
        "How do you select the products for your marketplace?",
        "We have a dedicated curation team that reviews all submissions from artisans and \
         makers. We look for uniqueness, quality, craftsmanship, and items that tell a story. \
         Only about 20% of submitted products make it to our marketplace.",
    ),
    (
        "Do you ship internationally?",
        "Yes, we ship to most countries worldwide. Shipping rates and delivery times vary \
         depending on the destination. You can see the shipping cost during checkout before \
         finalizing your purchase.",
    ),
    (
        "What is your return policy?",
        "We offer a 30-day return policy for most items (some custom-made pieces are exempt). \
         If you're not completely satisfied with your purchase, you can return it in its \
         original condition for a full refund or store credit.",
    ),
];

const CONTACT: &[(&str, &str)] = &[
    ("Address", "123 Craft Street, Artisan City, AC 12345"),
    ("Phone", "(555) 123-4567"),
    ("Email", "support@curatedcrafts.com"),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Percentage(45), // mission + values
        Constraint::Min(8),         // faq
        Constraint::Length(5),      // contact
    ])
    .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let heading = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    // Mission and values
    let mut story: Vec<Line> = STORY
        .iter()
        .flat_map(|p| [Line::from(*p), Line::from("")])
        .collect();
    for (title, text) in VALUES {
        story.push(Line::from(vec![
            Span::styled(format!("  {title:<10}"), heading),
            Span::styled(*text, Style::default().fg(Color::Gray)),
        ]));
    }
    let story = Paragraph::new(story)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(label)
                .title(format!(" Our Mission & Story · {} ", app.store_name)),
        );
    frame.render_widget(story, layout[0]);

    // FAQ
    let faq: Vec<Line> = FAQ
        .iter()
        .flat_map(|(q, a)| {
            [
                Line::from(Span::styled(
                    format!("Q: {q}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*a, Style::default().fg(Color::Gray))),
                Line::from(""),
            ]
        })
        .collect();
    let faq = Paragraph::new(faq).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(label)
            .title(" Frequently Asked Questions "),
    );
    frame.render_widget(faq, layout[1]);

    // Contact
    let contact: Vec<Line> = CONTACT
        .iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("  {k:<9}"), label),
                Span::styled(*v, Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();
    let contact = Paragraph::new(contact).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(label)
            .title(" Contact "),
    );
    frame.render_widget(contact, layout[2]);
}
