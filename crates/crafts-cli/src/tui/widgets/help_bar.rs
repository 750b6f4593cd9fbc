use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::app::{InputMode, Panel, Screen};

/// Bottom help bar showing context-sensitive key bindings.
pub struct HelpBar<'a> {
    pub screen: Screen,
    pub panel: Panel,
    pub input_mode: &'a InputMode,
}

impl HelpBar<'_> {
    fn bindings(&self) -> &'static [(&'static str, &'static str)] {
        match (self.panel, self.screen, self.input_mode) {
            (Panel::Chat, _, _) => &[("Enter", "send"), ("Esc", "close chat")],
            (Panel::Cart, _, _) => &[
                ("j/k", "select"),
                ("+/-", "quantity"),
                ("d", "remove"),
                ("Enter", "checkout"),
                ("Esc", "close cart"),
            ],
            (Panel::None, Screen::Shop, InputMode::Search) => {
                &[("Enter", "keep search"), ("Esc", "clear search")]
            }
            (Panel::None, Screen::Shop, InputMode::Filter) => {
                &[("←/→", "cycle category"), ("Enter/Esc", "confirm")]
            }
            (Panel::None, Screen::Shop, InputMode::Normal) => &[
                ("j/k", "navigate"),
                ("Enter", "add to cart"),
                ("/", "search"),
                ("f", "category"),
                ("s", "sort"),
                ("x", "clear filters"),
                ("c", "cart"),
                ("a", "assistant"),
                ("r", "refresh"),
                ("q", "quit"),
            ],
            (Panel::None, Screen::Home, _) => &[
                ("Enter", "shop now"),
                ("1-3/Tab", "pages"),
                ("c", "cart"),
                ("a", "assistant"),
                ("r", "refresh"),
                ("q", "quit"),
            ],
            (Panel::None, Screen::About, _) => &[
                ("1-3/Tab", "pages"),
                ("c", "cart"),
                ("a", "assistant"),
                ("q", "quit"),
            ],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let bindings = self.bindings();
        let mut spans: Vec<Span> = Vec::with_capacity(bindings.len() * 2);
        for (i, (key, action)) in bindings.iter().enumerate() {
            spans.push(Span::styled(*key, key_style));
            let sep = if i + 1 < bindings.len() { "  " } else { "" };
            spans.push(Span::styled(format!(" {action}{sep}"), style));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
