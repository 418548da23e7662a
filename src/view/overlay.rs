//! Expanded-card overlay
//!
//! The expanded card covers the whole viewport. Its chrome (top border, title
//! bar, separator and bottom border) stays fixed while the emphasized body
//! scrolls between them.

use super::blocks::BodyOptions;
use super::card::{build_card, control_at, CardOptions, Control, TITLE_BAR_ROW};
use super::theme::Theme;
use crate::card::CardId;
use crate::content::Portfolio;
use crate::services::links::LinkTarget;
use crate::state::CardView;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

/// Columns between the side borders and the body in the overlay.
const OVERLAY_PADDING: u16 = 4;

/// Rows of chrome above the body: top border, title bar, separator.
const CHROME_TOP: u16 = 3;

/// Layout information returned from overlay rendering
#[derive(Debug, Clone, Default)]
pub struct OverlayLayout {
    pub card: Option<CardId>,
    pub area: Rect,
    pub body_area: Rect,
    pub scroll: u16,
    pub max_scroll: u16,
    pub line_links: Vec<Option<usize>>,
    pub links: Vec<LinkTarget>,
}

/// Something under the mouse in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    Control(Control),
    Link(usize),
}

impl OverlayLayout {
    pub fn hit_test(&self, col: u16, row: u16) -> Option<OverlayHit> {
        let area = self.area;
        if col < area.x || col >= area.right() {
            return None;
        }
        if area.height > TITLE_BAR_ROW && row == area.y + TITLE_BAR_ROW {
            return control_at(col - area.x).map(OverlayHit::Control);
        }
        let body = self.body_area;
        if row < body.y || row >= body.bottom() {
            return None;
        }
        let line = (self.scroll + row - body.y) as usize;
        self.line_links
            .get(line)
            .copied()
            .flatten()
            .map(OverlayHit::Link)
    }

    /// Body line of a link, for keeping a selected link on screen.
    pub fn link_line(&self, link: usize) -> Option<u16> {
        self.line_links
            .iter()
            .position(|l| *l == Some(link))
            .map(|line| line as u16)
    }
}

/// Render `card` over `area`. `scroll` is clamped to the body length.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    card: CardId,
    portfolio: &Portfolio,
    theme: &Theme,
    selected_link: Option<usize>,
    scroll: u16,
) -> OverlayLayout {
    let card_frame = build_card(
        card,
        portfolio,
        theme,
        area.width,
        CardOptions {
            view: CardView::Expanded,
            focused: true,
            highlighted: false,
            padding: OVERLAY_PADDING,
            body: BodyOptions {
                emphasis: true,
                selected_link,
            },
        },
    );

    let mut lines = card_frame.lines;
    let mut line_links = card_frame.line_links;
    let Some(bottom) = lines.pop() else {
        return OverlayLayout::default();
    };
    line_links.pop();
    let chrome_top = (CHROME_TOP as usize).min(lines.len());
    let body: Vec<Line<'static>> = lines.split_off(chrome_top);
    let body_links = line_links.split_off(chrome_top.min(line_links.len()));
    // The first body line is the blank padding row under the separator
    let blank = body.first().cloned().unwrap_or_default();

    let body_height = area.height.saturating_sub(CHROME_TOP + 1);
    let body_area = Rect::new(area.x, area.y + CHROME_TOP, area.width, body_height);
    let max_scroll = (body.len() as u16).saturating_sub(body_height);
    let scroll = scroll.min(max_scroll);

    let start = scroll as usize;
    let mut visible: Vec<Line<'static>> = body
        .iter()
        .skip(start)
        .take(body_height as usize)
        .cloned()
        .collect();
    visible.resize(body_height as usize, blank);

    let base = Style::default().fg(theme.page_fg).bg(theme.card_bg);
    frame.render_widget(Clear, area);
    let chrome_area = Rect::new(area.x, area.y, area.width, CHROME_TOP.min(area.height));
    frame.render_widget(Paragraph::new(lines).style(base), chrome_area);
    frame.render_widget(Paragraph::new(visible).style(base), body_area);
    if area.height > CHROME_TOP {
        let bottom_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        frame.render_widget(Paragraph::new(bottom).style(base), bottom_area);
    }

    OverlayLayout {
        card: Some(card),
        area,
        body_area,
        scroll,
        max_scroll,
        line_links: body_links,
        links: card_frame.links,
    }
}
