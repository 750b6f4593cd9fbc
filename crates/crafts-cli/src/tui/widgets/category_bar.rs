use crafts_core::filter::display_category;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// One-line category picker: "All" followed by every catalog category.
///
/// Scrolls horizontally so the selected entry is always on screen.
pub struct CategoryBar<'a> {
    pub categories: &'a [String],
    /// 0 = All, otherwise index + 1 into `categories`.
    pub selected_index: usize,
    pub active: bool,
}

impl Widget for CategoryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prefix = if self.active { "Category: " } else { "Filter: " };
        let labels: Vec<String> = std::iter::once("All".to_string())
            .chain(self.categories.iter().map(|c| display_category(c)))
            .collect();

        // Each entry renders as " label " plus a one-column separator.
        let widths: Vec<usize> = labels.iter().map(|l| l.chars().count() + 3).collect();
        let available = (area.width as usize).saturating_sub(prefix.len() + 2);
        let start = window_start(&widths, self.selected_index, available);

        let mut spans: Vec<Span> = vec![Span::styled(prefix, Style::default().fg(Color::DarkGray))];
        if start > 0 {
            spans.push(Span::styled("‹", Style::default().fg(Color::DarkGray)));
        }

        for (i, label) in labels.iter().enumerate().skip(start) {
            let style = if i == self.selected_index {
                if self.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                }
            } else {
                Style::default().fg(Color::DarkGray)
            };

            spans.push(Span::styled(format!(" {label} "), style));

            if i < labels.len() - 1 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// First entry to draw so that `selected` fits in `available` columns.
fn window_start(widths: &[usize], selected: usize, available: usize) -> usize {
    let selected = selected.min(widths.len().saturating_sub(1));
    let mut start = 0;
    let mut used: usize = widths.iter().take(selected + 1).sum();
    while used > available && start < selected {
        used -= widths[start];
        start += 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start_fits() {
        assert_eq!(window_start(&[5, 5, 5], 2, 80), 0);
    }

    #[test]
    fn test_window_start_scrolls_to_selected() {
        // Only two entries fit; selecting the fourth drops the first two.
        assert_eq!(window_start(&[5, 5, 5, 5], 3, 10), 2);
        assert_eq!(window_start(&[5, 5, 5, 5], 0, 10), 0);
    }

    #[test]
    fn test_window_start_oversized_entry() {
        // An entry wider than the bar is still drawn first.
        assert_eq!(window_start(&[5, 50], 1, 10), 1);
    }

    #[test]
    fn test_window_start_empty() {
        assert_eq!(window_start(&[], 0, 10), 0);
    }
}
