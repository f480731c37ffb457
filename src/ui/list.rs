//! Lazily materialized list of hero cards.
//!
//! Content is laid out on a virtual column of rows: padding, then one card
//! every [`LayoutTokens::stride`] rows, then padding. Only the cards that
//! intersect the viewport (plus [`OVERSCAN`] on each side) are ever built,
//! so a frame costs the same for 12 heroes or 10 000.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{card::HeroCard, copy_row};
use crate::catalog::resources::{
    resolve_image_or_placeholder, resolve_text_or_placeholder, ResourceResolver,
};
use crate::catalog::Catalog;
use crate::config::LayoutTokens;
use crate::theme::Theme;

/// Extra cards built above and below the viewport
pub const OVERSCAN: usize = 1;

/// Emitted after every scroll request, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    /// Rows asked for (positive = down, away from the top)
    pub requested: i64,
    /// Rows the list actually moved after clamping
    pub consumed: i64,
    /// Position after the move
    pub position: usize,
}

/// Something that reacts to list scrolling
pub trait ScrollObserver {
    fn on_scroll(&mut self, event: &ScrollEvent);
}

/// A card that should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub index: usize,
    /// Row of the card's top edge relative to the viewport; negative when
    /// the card starts above it
    pub top: i64,
}

/// Total rows of the scrollable content
pub fn content_height(len: usize, tokens: &LayoutTokens) -> usize {
    let padding = 2 * tokens.content_padding_y as usize;
    if len == 0 {
        return padding;
    }
    padding + len * tokens.item_extent() as usize + (len - 1) * tokens.item_spacing as usize
}

pub fn max_position(len: usize, viewport_height: u16, tokens: &LayoutTokens) -> usize {
    content_height(len, tokens).saturating_sub(viewport_height as usize)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LazyListState {
    position: usize,
}

impl LazyListState {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn scroll_by(
        &mut self,
        delta: i64,
        len: usize,
        viewport_height: u16,
        tokens: &LayoutTokens,
    ) -> ScrollEvent {
        let max = max_position(len, viewport_height, tokens);
        let before = self.position;

        let target = if delta < 0 {
            before.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            before.saturating_add(delta as usize)
        };
        self.position = target.min(max);

        ScrollEvent {
            requested: delta,
            consumed: self.position as i64 - before as i64,
            position: self.position,
        }
    }

    pub fn scroll_to_top(
        &mut self,
        len: usize,
        viewport_height: u16,
        tokens: &LayoutTokens,
    ) -> ScrollEvent {
        self.scroll_by(-(self.position as i64), len, viewport_height, tokens)
    }

    pub fn scroll_to_bottom(
        &mut self,
        len: usize,
        viewport_height: u16,
        tokens: &LayoutTokens,
    ) -> ScrollEvent {
        let max = max_position(len, viewport_height, tokens);
        self.scroll_by(max as i64 - self.position as i64, len, viewport_height, tokens)
    }

    /// Pull the position back into range after the viewport grew
    pub fn clamp(
        &mut self,
        len: usize,
        viewport_height: u16,
        tokens: &LayoutTokens,
    ) -> Option<ScrollEvent> {
        let max = max_position(len, viewport_height, tokens);
        if self.position <= max {
            return None;
        }
        let before = self.position;
        self.position = max;
        let moved = max as i64 - before as i64;
        Some(ScrollEvent {
            requested: moved,
            consumed: moved,
            position: max,
        })
    }
}

/// Cards intersecting a viewport of `viewport_height` rows starting at
/// content row `position`, in catalog order, plus the overscan.
pub fn visible_slots(
    position: usize,
    viewport_height: u16,
    len: usize,
    tokens: &LayoutTokens,
) -> Vec<CardSlot> {
    if len == 0 || viewport_height == 0 {
        return Vec::new();
    }

    let padding = tokens.content_padding_y as usize;
    let extent = tokens.item_extent() as usize;
    let stride = tokens.stride() as usize;
    let bottom = position + viewport_height as usize;

    // First card whose last row is at or below `position`
    let first = if position < padding + extent {
        0
    } else {
        (position - padding - extent) / stride + 1
    };
    // One past the last card whose first row is above `bottom`
    let end = if bottom <= padding {
        0
    } else {
        (bottom - padding - 1) / stride + 1
    };

    let first = first.min(len);
    let end = end.min(len);
    let start = first.saturating_sub(OVERSCAN);
    let end = (end + OVERSCAN).min(len).max(start);

    (start..end)
        .map(|index| CardSlot {
            index,
            top: (padding + index * stride) as i64 - position as i64,
        })
        .collect()
}

/// Draw `slots` into `viewport`. Each card is rendered whole into a scratch
/// buffer and only its rows inside the viewport are copied, so cards clip
/// cleanly at both edges. Returns the number of cards built.
pub fn render_list(
    buf: &mut Buffer,
    viewport: Rect,
    slots: &[CardSlot],
    catalog: &Catalog,
    resources: &dyn ResourceResolver,
    theme: &Theme,
    tokens: &LayoutTokens,
) -> usize {
    let padding_x = tokens.content_padding_x;
    let width = viewport.width.saturating_sub(padding_x.saturating_mul(2));
    let extent = tokens.item_extent();
    if catalog.is_empty() || width == 0 || viewport.height == 0 {
        return 0;
    }

    let mut built = 0;
    for slot in slots {
        let Some(item) = catalog.get(slot.index) else {
            continue;
        };

        let name = resolve_text_or_placeholder(resources, item.name);
        let description = resolve_text_or_placeholder(resources, item.description);
        let image = resolve_image_or_placeholder(resources, item.image);

        let mut scratch = Buffer::empty(Rect::new(0, 0, width, extent));
        HeroCard::new(name, description, &image, theme, tokens).render(scratch.area, &mut scratch);
        built += 1;

        for row in 0..extent {
            let y = slot.top + row as i64;
            if y < 0 || y >= viewport.height as i64 {
                continue;
            }
            copy_row(&scratch, row, buf, viewport.x + padding_x, viewport.y + y as u16);
        }
    }

    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resources::ResourceTable;
    use crate::catalog::{BuiltinCatalog, CatalogProvider};
    use std::collections::BTreeSet;

    fn tokens() -> LayoutTokens {
        LayoutTokens::default()
    }

    #[test]
    fn test_content_height() {
        let t = tokens();
        // padding 1 + 1, extent 7, spacing 1
        assert_eq!(content_height(0, &t), 2);
        assert_eq!(content_height(1, &t), 9);
        assert_eq!(content_height(12, &t), 2 + 12 * 7 + 11);
    }

    #[test]
    fn test_every_item_appears_once_in_order() {
        let t = tokens();
        for len in [0usize, 1, 2, 5, 12, 37] {
            let viewport = 20;
            let max = max_position(len, viewport, &t);
            let mut seen = BTreeSet::new();

            for position in 0..=max {
                let slots = visible_slots(position, viewport, len, &t);
                for pair in slots.windows(2) {
                    assert_eq!(pair[0].index + 1, pair[1].index, "slots must be consecutive");
                }
                for slot in &slots {
                    let top = slot.top;
                    let bottom = top + t.item_extent() as i64;
                    // Only count cards that actually intersect the viewport
                    if bottom > 0 && top < viewport as i64 {
                        seen.insert(slot.index);
                    }
                }
            }

            assert_eq!(seen.len(), len);
            assert_eq!(seen.into_iter().collect::<Vec<_>>(), (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_slot_positions() {
        let t = tokens();
        let slots = visible_slots(0, 20, 12, &t);

        assert_eq!(slots[0], CardSlot { index: 0, top: 1 });
        assert_eq!(slots[1], CardSlot { index: 1, top: 9 });
        // Rows 0..20 show cards 0..3, plus one of overscan
        assert_eq!(slots.len(), 4);

        // Scrolled into the gap after card 0: card 0 is overscan only
        let slots = visible_slots(8, 20, 12, &t);
        assert_eq!(slots[0].index, 0);
        assert_eq!(slots[0].top, -7);
        assert_eq!(slots[1], CardSlot { index: 1, top: 1 });
    }

    #[test]
    fn test_virtualization_is_bounded() {
        let t = tokens();
        let len = 10_000;
        let viewport = 40u16;
        let bound = viewport as usize / t.stride() as usize + 2 + 2 * OVERSCAN;

        let max = max_position(len, viewport, &t);
        for position in (0..=max).step_by(97).chain([max]) {
            let slots = visible_slots(position, viewport, len, &t);
            assert!(!slots.is_empty());
            assert!(slots.len() <= bound, "{} slots at {}", slots.len(), position);
        }

        let last = visible_slots(max, viewport, len, &t);
        assert_eq!(last.last().map(|s| s.index), Some(len - 1));
    }

    fn draw_at(
        position: usize,
        catalog: &Catalog,
        viewport: Rect,
        t: &LayoutTokens,
    ) -> (Buffer, usize) {
        let mut buf = Buffer::empty(viewport);
        let slots = visible_slots(position, viewport.height, catalog.len(), t);
        let built = render_list(
            &mut buf,
            viewport,
            &slots,
            catalog,
            &ResourceTable::builtin(),
            &Theme::dark(),
            t,
        );
        (buf, built)
    }

    #[test]
    fn test_render_list_cost_is_independent_of_length() {
        let t = tokens();
        let catalog = BuiltinCatalog::repeated(834).catalog().clone();
        assert!(catalog.len() >= 10_000);
        let viewport = Rect::new(0, 0, 60, 30);
        let bound = viewport.height as usize / t.stride() as usize + 2 + 2 * OVERSCAN;

        let max = max_position(catalog.len(), viewport.height, &t);
        for position in [0, 1, 4, 5_000, 40_000, max] {
            let (_, built) = draw_at(position, &catalog, viewport, &t);
            let slots = visible_slots(position, viewport.height, catalog.len(), &t);
            assert_eq!(built, slots.len());
            assert!(built > 0);
            assert!(built <= bound, "{} cards built at {}", built, position);
        }
    }

    #[test]
    fn test_render_list_clips_card_above_viewport() {
        let t = tokens();
        let catalog = BuiltinCatalog::new().catalog().clone();
        let viewport = Rect::new(0, 0, 60, 20);
        let left = t.content_padding_x;

        // Card 0 starts three rows above the viewport
        let slots = visible_slots(4, viewport.height, catalog.len(), &t);
        assert_eq!(slots[0], CardSlot { index: 0, top: -3 });

        let (buf, _) = draw_at(4, &catalog, viewport, &t);
        let symbol = |x: u16, y: u16| buf.cell((x, y)).unwrap().symbol().to_string();

        // Top border and name are gone, the side border and bottom remain
        assert_eq!(symbol(left, 0), "│");
        assert_eq!(symbol(left, 1), "│");
        assert_eq!(symbol(left, 2), "╰");
        // Shadow row, then spacing, then card 1 in full
        assert_eq!(symbol(left, 3), " ");
        assert_eq!(symbol(left, 5), "╭");
        assert_eq!(buf.cell((left, 2)).unwrap().fg, Theme::dark().outline);
    }

    #[test]
    fn test_render_list_with_huge_padding() {
        let t = LayoutTokens {
            content_padding_x: 40_000,
            ..tokens()
        };
        let catalog = BuiltinCatalog::new().catalog().clone();
        let (buf, built) = draw_at(0, &catalog, Rect::new(0, 0, 60, 20), &t);
        assert_eq!(built, 0);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }

    #[test]
    fn test_huge_spacing_from_file_lays_out() {
        let t = crate::config::AppConfig::from_toml("[layout]\nitem_spacing = 65529\n")
            .unwrap()
            .layout;
        let slots = visible_slots(100, 20, 12, &t);
        assert!(slots.len() <= 2 + 2 * OVERSCAN);
        assert!(slots.windows(2).all(|p| p[0].index + 1 == p[1].index));
    }

    #[test]
    fn test_scroll_clamps_and_reports() {
        let t = tokens();
        let mut state = LazyListState::default();

        let event = state.scroll_by(-5, 12, 20, &t);
        assert_eq!(event, ScrollEvent { requested: -5, consumed: 0, position: 0 });

        let event = state.scroll_by(10, 12, 20, &t);
        assert_eq!(event.consumed, 10);
        assert_eq!(state.position(), 10);

        let max = max_position(12, 20, &t);
        let event = state.scroll_to_bottom(12, 20, &t);
        assert_eq!(event.position, max);
        let event = state.scroll_by(3, 12, 20, &t);
        assert_eq!(event.consumed, 0);
        assert_eq!(event.requested, 3);

        let event = state.scroll_to_top(12, 20, &t);
        assert_eq!(event.position, 0);
        assert_eq!(event.consumed, -(max as i64));
    }

    #[test]
    fn test_clamp_after_resize() {
        let t = tokens();
        let mut state = LazyListState::default();
        state.scroll_to_bottom(12, 20, &t);
        let before = state.position();

        assert_eq!(state.clamp(12, 20, &t), None);
        let event = state.clamp(12, 30, &t).unwrap();
        assert_eq!(event.position, before - 10);
        assert_eq!(state.position(), before - 10);
    }

    #[test]
    fn test_empty_list() {
        let t = tokens();
        let mut state = LazyListState::default();
        assert!(visible_slots(0, 20, 0, &t).is_empty());
        assert_eq!(state.scroll_by(5, 0, 20, &t).position, 0);
        assert_eq!(max_position(0, 0, &t), 2);
    }
}
