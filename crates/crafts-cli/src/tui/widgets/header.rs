use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::tui::app::Screen;

/// Top navigation bar: store name, page tabs and the live cart badge.
pub struct Header<'a> {
    pub store_name: &'a str,
    pub screen: Screen,
    /// Sum of quantities in the cart.
    pub cart_count: u64,
    pub cart_open: bool,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.store_name),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut tabs: Vec<Span> = Vec::new();
        for (i, screen) in Screen::ALL.iter().enumerate() {
            let style = if *screen == self.screen {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            tabs.push(Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)));
            tabs.push(Span::styled(format!(" {} ", screen.title()), style));
            tabs.push(Span::raw(" "));
        }
        buf.set_line(inner.x, inner.y, &Line::from(tabs), inner.width);

        let badge_style = if self.cart_count > 0 {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let badge_style = if self.cart_open {
            badge_style.add_modifier(Modifier::REVERSED)
        } else {
            badge_style
        };
        let badge = cart_badge(self.cart_count);
        let width = badge.chars().count() as u16;
        if width < inner.width {
            let x = inner.x + inner.width - width;
            buf.set_line(
                x,
                inner.y,
                &Line::from(Span::styled(badge, badge_style)),
                width,
            );
        }
    }
}

fn cart_badge(count: u64) -> String {
    format!(" [c] Cart ({count}) ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(header: Header, width: u16) -> String {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_badge_shows_item_count() {
        let line = render_to_string(
            Header {
                store_name: "CuratedCrafts",
                screen: Screen::Shop,
                cart_count: 3,
                cart_open: false,
            },
            80,
        );
        assert!(line.contains("Cart (3)"));
        assert!(line.contains("Home"));
        assert!(line.contains("Shop"));
        assert!(line.contains("About"));
    }
}
