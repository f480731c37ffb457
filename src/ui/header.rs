//! Title bar that slides away while the list scrolls down.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::copy_row;
use super::list::{ScrollEvent, ScrollObserver};
use crate::theme::Theme;

/// Collapse state of the title bar.
///
/// `offset` runs from `0.0` (fully expanded) to `-height` (fully hidden).
/// Scroll rows go to the bar first, in both directions, and only the rest
/// moves the list; so one row of scroll moves the content by one screen row.
/// Reaching the top of the list always expands it fully.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderState {
    height: u16,
    offset: f32,
}

impl HeaderState {
    pub fn new(height: u16) -> Self {
        Self { height, offset: 0.0 }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Rows of the bar currently on screen
    pub fn visible_height(&self) -> u16 {
        (self.height as f32 + self.offset).round().clamp(0.0, self.height as f32) as u16
    }

    /// 0.0 when expanded, 1.0 when hidden
    pub fn collapsed_fraction(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        -self.offset / self.height as f32
    }

    pub fn is_expanded(&self) -> bool {
        self.offset == 0.0
    }

    pub fn expand(&mut self) {
        self.offset = 0.0;
    }

    /// Take as much of `delta` as the bar can absorb (positive collapses,
    /// negative expands) and return what is left for the list.
    pub fn pre_scroll(&mut self, delta: i64) -> i64 {
        let limit = -(self.height as f32);
        let before = self.offset;
        self.offset = (self.offset - delta as f32).clamp(limit, 0.0);
        delta - (before - self.offset).round() as i64
    }
}

impl ScrollObserver for HeaderState {
    fn on_scroll(&mut self, event: &ScrollEvent) {
        if event.position == 0 && event.consumed < 0 && !self.is_expanded() {
            tracing::trace!("Back at the top, expanding header");
            self.expand();
        }
    }
}

/// Centered title with a rule underneath. When only part of the bar is
/// visible, the bottom rows are the ones shown.
pub struct TitleBar<'a> {
    title: &'a str,
    state: &'a HeaderState,
    theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, state: &'a HeaderState, theme: &'a Theme) -> Self {
        Self { title, state, theme }
    }

    fn render_full(&self, area: Rect, buf: &mut Buffer) {
        let background = Style::default().bg(self.theme.background);
        buf.set_style(area, background);

        let title_row = if area.height >= 2 {
            Block::new()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(self.theme.accent))
                .style(background)
                .render(area, buf);
            area.y + area.height - 2
        } else {
            area.y
        };

        Paragraph::new(self.title)
            .style(self.theme.title_style())
            .alignment(Alignment::Center)
            .render(Rect { y: title_row, height: 1, ..area }, buf);
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let full_height = self.state.height();
        let visible = self.state.visible_height().min(area.height);
        if visible == 0 || area.width == 0 {
            return;
        }

        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, full_height));
        self.render_full(scratch.area, &mut scratch);

        let skipped = full_height - visible;
        for row in 0..visible {
            copy_row(&scratch, skipped + row, buf, area.x, area.y + row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_is_continuous() {
        let mut header = HeaderState::new(4);
        assert!(header.is_expanded());

        assert_eq!(header.pre_scroll(1), 0);
        assert_eq!(header.visible_height(), 3);
        assert_eq!(header.collapsed_fraction(), 0.25);

        assert_eq!(header.pre_scroll(2), 0);
        assert_eq!(header.visible_height(), 1);

        // Only one row left to hide; the rest goes to the list
        assert_eq!(header.pre_scroll(50), 49);
        assert_eq!(header.visible_height(), 0);
        assert_eq!(header.collapsed_fraction(), 1.0);
        assert_eq!(header.pre_scroll(5), 5);

        // Scrolling up part way brings it back part way
        assert_eq!(header.pre_scroll(-2), 0);
        assert_eq!(header.visible_height(), 2);
        assert_eq!(header.pre_scroll(-7), -5);
        assert!(header.is_expanded());
    }

    #[test]
    fn test_top_of_list_expands() {
        let mut header = HeaderState::new(3);
        header.pre_scroll(30);
        assert_eq!(header.visible_height(), 0);

        // A resize that pulls the list back to the top
        header.on_scroll(&ScrollEvent {
            requested: -30,
            consumed: -30,
            position: 0,
        });
        assert!(header.is_expanded());
        assert_eq!(header.visible_height(), 3);
    }

    #[test]
    fn test_resting_at_top_does_not_expand() {
        let mut header = HeaderState::new(3);
        let left = header.pre_scroll(2);
        header.on_scroll(&ScrollEvent {
            requested: left,
            consumed: 0,
            position: 0,
        });
        assert_eq!(header.visible_height(), 1);
    }

    #[test]
    fn test_zero_height_bar_passes_everything_on() {
        let mut header = HeaderState::new(0);
        assert_eq!(header.pre_scroll(4), 4);
        assert_eq!(header.pre_scroll(-4), -4);
        assert_eq!(header.visible_height(), 0);
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_title_bar_slides_up() {
        let theme = Theme::dark();
        let mut state = HeaderState::new(3);

        let mut buf = Buffer::empty(Rect::new(0, 0, 21, 3));
        TitleBar::new("Superheroes", &state, &theme).render(buf.area, &mut buf);
        let full = rows(&buf);
        assert_eq!(full[0].trim(), "");
        assert_eq!(full[1].trim(), "Superheroes");
        assert!(full[2].chars().all(|c| c == '─'));
        assert_eq!(buf.cell((5, 1)).unwrap().fg, theme.header);

        state.pre_scroll(1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 21, 2));
        TitleBar::new("Superheroes", &state, &theme).render(buf.area, &mut buf);
        let partial = rows(&buf);
        assert_eq!(partial[0].trim(), "Superheroes");
        assert_eq!(partial[1], full[2]);
    }
}
