//! A single hero card: text on the left, portrait on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::catalog::resources::ImageAsset;
use crate::config::LayoutTokens;
use crate::theme::Theme;

/// Card panel for one hero. Renders into whatever area it is given: the
/// panel takes the area minus the elevation, the shadow fills the rest.
pub struct HeroCard<'a> {
    name: &'a str,
    description: &'a str,
    image: &'a ImageAsset,
    theme: &'a Theme,
    tokens: &'a LayoutTokens,
}

impl<'a> HeroCard<'a> {
    pub fn new(
        name: &'a str,
        description: &'a str,
        image: &'a ImageAsset,
        theme: &'a Theme,
        tokens: &'a LayoutTokens,
    ) -> Self {
        Self {
            name,
            description,
            image,
            theme,
            tokens,
        }
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer) {
        // Names wrap instead of being cut off
        let text = Paragraph::new(vec![
            Line::styled(self.name, self.theme.display_style()),
            Line::styled(self.description, self.theme.body_style()),
        ])
        .wrap(Wrap { trim: false });

        text.render(area, buf);
    }

    fn render_image(&self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::vertical([Constraint::Length(self.tokens.image_height)])
            .flex(Flex::Center)
            .areas(area);

        let frame = Block::bordered()
            .border_type(self.theme.image_shape)
            .border_style(Style::default().fg(self.image.tint))
            .style(Style::default().bg(self.image.tint));
        let inner = frame.inner(area);
        frame.render(area, buf);

        if inner.height == 0 {
            return;
        }
        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        Paragraph::new(self.image.monogram.as_str())
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(self.image.tint)
                    .add_modifier(self.theme.display),
            )
            .alignment(Alignment::Center)
            .render(middle, buf);
    }
}

impl Widget for HeroCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let elevation = self.tokens.elevation;
        buf.set_style(area, Style::default().bg(self.theme.background));

        let panel = Rect {
            width: area.width.saturating_sub(elevation),
            height: area.height.saturating_sub(elevation).min(self.tokens.card_height),
            ..area
        };
        if panel.width == 0 || panel.height == 0 {
            return;
        }

        if elevation > 0 {
            let shadow = Rect {
                x: panel.x + elevation,
                y: panel.y + elevation,
                ..panel
            }
            .intersection(area);
            buf.set_style(shadow, Style::default().bg(self.theme.shadow));
        }

        Clear.render(panel, buf);
        let block = Block::bordered()
            .border_type(self.theme.card_shape)
            .border_style(Style::default().fg(self.theme.outline))
            .style(Style::default().bg(self.theme.surface))
            .padding(Padding::horizontal(self.tokens.card_padding));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let [text_area, _, image_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(self.tokens.image_gap),
            Constraint::Length(self.tokens.image_width),
        ])
        .areas(inner);

        self.render_text(text_area, buf);
        self.render_image(image_area, buf);
    }
}
