pub mod card;
pub mod header;
pub mod list;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget, Frame};

use crate::app::App;
use crate::catalog::resources::{resolve_text_or_placeholder, TITLE};
use crate::config::{Insets, LayoutTokens};
use header::{HeaderState, TitleBar};
use list::{visible_slots, CardSlot, LazyListState};

/// Where everything goes for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub viewport: Rect,
    pub slots: Vec<CardSlot>,
}

/// `area` minus the device insets
pub fn safe_area(area: Rect, insets: &Insets) -> Rect {
    let x = area.x.saturating_add(insets.left);
    let y = area.y.saturating_add(insets.top);
    let width = area.width.saturating_sub(insets.left.saturating_add(insets.right));
    let height = area.height.saturating_sub(insets.top.saturating_add(insets.bottom));
    Rect::new(x, y, width, height)
}

/// Stack the header above the list viewport and work out which cards are
/// on screen. Pure: the same inputs always give the same layout.
pub fn compose(
    area: Rect,
    insets: &Insets,
    header: &HeaderState,
    list: &LazyListState,
    len: usize,
    tokens: &LayoutTokens,
) -> ScreenLayout {
    let safe = safe_area(area, insets);
    let header_height = header.visible_height().min(safe.height);

    let header_area = Rect {
        height: header_height,
        ..safe
    };
    let viewport = Rect {
        y: safe.y + header_height,
        height: safe.height - header_height,
        ..safe
    };

    ScreenLayout {
        header: header_area,
        viewport,
        slots: visible_slots(list.position(), viewport.height, len, tokens),
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let layout = compose(
        area,
        &app.insets,
        &app.header,
        &app.list,
        app.catalog.len(),
        &app.tokens,
    );

    let buf = f.buffer_mut();
    buf.set_style(area, Style::default().bg(app.theme.background));

    let title = resolve_text_or_placeholder(&*app.resources, TITLE);
    TitleBar::new(title, &app.header, &app.theme).render(layout.header, buf);

    let built = list::render_list(
        buf,
        layout.viewport,
        &layout.slots,
        &app.catalog,
        &*app.resources,
        &app.theme,
        &app.tokens,
    );
    tracing::trace!(built, position = app.list.position(), "frame");
}

/// Copy row `row` of `src` into `dst` starting at (`x`, `y`); cells that
/// fall outside `dst` are dropped.
fn copy_row(src: &Buffer, row: u16, dst: &mut Buffer, x: u16, y: u16) {
    for col in 0..src.area.width {
        let Some(cell) = src.cell((src.area.x + col, src.area.y + row)) else {
            continue;
        };
        if let Some(target) = dst.cell_mut((x.saturating_add(col), y)) {
            *target = cell.clone();
        }
    }
}
