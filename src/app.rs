use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::catalog::resources::ResourceResolver;
use crate::catalog::Catalog;
use crate::config::{Insets, LayoutTokens};
use crate::theme::Theme;
use crate::ui::header::HeaderState;
use crate::ui::list::{content_height, LazyListState, ScrollEvent, ScrollObserver};
use crate::ui::safe_area;

/// Rows moved per mouse wheel notch
const WHEEL_STEP: i64 = 3;

/// The screen: a title bar over the hero list.
///
/// Built once at startup; afterwards only the scroll state changes.
pub struct App {
    pub catalog: Catalog,
    pub resources: Box<dyn ResourceResolver>,
    pub theme: Theme,
    pub tokens: LayoutTokens,
    pub insets: Insets,

    // Scroll state; the header follows the list
    pub list: LazyListState,
    pub header: HeaderState,

    // Terminal size, updated before every draw
    pub size: Rect,
}

impl App {
    pub fn new(
        catalog: Catalog,
        resources: Box<dyn ResourceResolver>,
        theme: Theme,
        tokens: LayoutTokens,
        insets: Insets,
    ) -> Self {
        let header = HeaderState::new(tokens.header_height);
        Self {
            catalog,
            resources,
            theme,
            tokens,
            insets,
            list: LazyListState::default(),
            header,
            size: Rect::default(),
        }
    }

    /// Rows the list can use once the header is out of the way. Scroll
    /// limits are measured against this so the last card is reachable.
    pub fn list_height(&self) -> u16 {
        safe_area(self.size, &self.insets).height
    }

    /// Rows shown right now, below the header
    pub fn viewport_height(&self) -> u16 {
        self.list_height()
            .saturating_sub(self.header.visible_height())
            .max(1)
    }

    /// Whether the content overflows the screen with the header expanded.
    /// When it does not, the header stays put.
    fn overflows(&self) -> bool {
        let expanded = self.list_height().saturating_sub(self.header.height());
        content_height(self.catalog.len(), &self.tokens) > expanded as usize
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let size = Rect::new(0, 0, width, height);
        if size == self.size {
            return;
        }
        tracing::debug!("Resized to {}x{}", width, height);
        self.size = size;

        let height = self.list_height();
        if let Some(event) = self.list.clamp(self.catalog.len(), height, &self.tokens) {
            self.follow(event);
        }
        if !self.overflows() {
            self.header.expand();
        }
    }

    /// Scroll by `delta` rows. The header absorbs what it can first; the
    /// list moves by the rest and the header sees the result before
    /// anything else happens.
    pub fn scroll_by(&mut self, delta: i64) -> ScrollEvent {
        let rest = if self.overflows() {
            self.header.pre_scroll(delta)
        } else {
            delta
        };
        let height = self.list_height();
        let event = self.list.scroll_by(rest, self.catalog.len(), height, &self.tokens);
        self.follow(event)
    }

    pub fn scroll_to_top(&mut self) -> ScrollEvent {
        let height = self.list_height();
        let event = self.list.scroll_to_top(self.catalog.len(), height, &self.tokens);
        self.header.expand();
        self.follow(event)
    }

    pub fn scroll_to_bottom(&mut self) -> ScrollEvent {
        if self.overflows() {
            self.header.pre_scroll(self.header.height() as i64);
        }
        let height = self.list_height();
        let event = self.list.scroll_to_bottom(self.catalog.len(), height, &self.tokens);
        self.follow(event)
    }

    /// Hand a scroll event to the header; it is fully applied before the
    /// next one is taken
    fn follow(&mut self, event: ScrollEvent) -> ScrollEvent {
        self.header.on_scroll(&event);
        tracing::trace!(
            requested = event.requested,
            consumed = event.consumed,
            position = event.position,
            collapsed = self.header.collapsed_fraction(),
            "scroll"
        );
        event
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let page = self.viewport_height() as i64;

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_by(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_by(-1);
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll_by(page);
            }
            KeyCode::PageUp => {
                self.scroll_by(-page);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll_to_top();
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll_to_bottom();
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_STEP);
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-WHEEL_STEP);
            }
            _ => {}
        }
    }
}
