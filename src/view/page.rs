//! Main flow layout
//!
//! The page is one tall column of lines: every in-flow card in canonical
//! order, separated by a blank row, then the footer. It is built fresh each
//! frame and drawn through a scrolled window. The resulting [`PageLayout`] is
//! what the frame "committed": card positions for scroll targets and hit
//! testing.

use super::card::{build_card, control_at, CardOptions, Control, TITLE_BAR_ROW};
use super::blocks::BodyOptions;
use super::theme::Theme;
use crate::card::CardId;
use crate::content::Portfolio;
use crate::services::links::LinkTarget;
use crate::state::{CardView, ViewState};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Cards never grow wider than this.
pub const MAX_CARD_WIDTH: u16 = 96;

/// Blank rows above the first card and between cards.
const CARD_GAP: u16 = 1;

/// Columns between the side borders and the body of an in-flow card.
const FLOW_PADDING: u16 = 2;

/// Position of a card within the page.
#[derive(Debug, Clone)]
pub struct CardSlot {
    pub id: CardId,
    /// First page row of the card
    pub top: u16,
    pub height: u16,
    pub line_links: Vec<Option<usize>>,
    pub links: Vec<LinkTarget>,
}

impl CardSlot {
    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }

    pub fn contains_row(&self, row: u16) -> bool {
        row >= self.top && row < self.bottom()
    }

    /// Page row of a link, for keeping a selected link on screen.
    pub fn link_row(&self, link: usize) -> Option<u16> {
        self.line_links
            .iter()
            .position(|l| *l == Some(link))
            .map(|row| self.top + row as u16)
    }
}

/// Something under the mouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Control(CardId, Control),
    Link(CardId, usize),
    Card(CardId),
}

/// Geometry of a built page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub cards: Vec<CardSlot>,
    pub total_height: u16,
    /// Screen area the page is scrolled within
    pub viewport: Rect,
    /// Left offset of the centered card column within the viewport
    pub x_offset: u16,
    pub card_width: u16,
}

impl PageLayout {
    pub fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport.height)
    }

    pub fn slot(&self, id: CardId) -> Option<&CardSlot> {
        self.cards.iter().find(|slot| slot.id == id)
    }

    pub fn card_top(&self, id: CardId) -> Option<u16> {
        self.slot(id).map(|slot| slot.top)
    }

    /// Resolve a screen cell to the card element drawn there.
    pub fn hit_test(&self, col: u16, row: u16, scroll: u16) -> Option<Hit> {
        let area = self.viewport;
        if row < area.y || row >= area.bottom() || col < area.x || col >= area.right() {
            return None;
        }
        let local_col = (col - area.x).checked_sub(self.x_offset)?;
        if local_col >= self.card_width {
            return None;
        }

        let page_row = scroll + (row - area.y);
        let slot = self.cards.iter().find(|slot| slot.contains_row(page_row))?;
        let local_row = page_row - slot.top;

        if local_row == TITLE_BAR_ROW {
            if let Some(control) = control_at(local_col) {
                return Some(Hit::Control(slot.id, control));
            }
        }
        match slot.line_links.get(local_row as usize).copied().flatten() {
            Some(link) => Some(Hit::Link(slot.id, link)),
            None => Some(Hit::Card(slot.id)),
        }
    }
}

/// Everything the page needs to know about the current frame.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub portfolio: &'a Portfolio,
    pub theme: &'a Theme,
    pub state: &'a ViewState,
    pub focus: Option<CardId>,
    pub highlight: Option<CardId>,
    pub selected_link: Option<usize>,
    pub year: i32,
}

/// A built page, ready to draw at any scroll offset.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub lines: Vec<Line<'static>>,
    pub layout: PageLayout,
}

fn footer(ctx: &PageContext<'_>) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "© {} {} · terminal portfolio",
            ctx.year, ctx.portfolio.identity.name
        ),
        ctx.theme.dim(),
    ))
    .alignment(Alignment::Center)
}

/// Lay out every in-flow card for a viewport.
pub fn build_page(ctx: &PageContext<'_>, viewport: Rect) -> Page {
    let card_width = viewport.width.min(MAX_CARD_WIDTH);
    let x_offset = (viewport.width - card_width) / 2;
    let indent = " ".repeat(x_offset as usize);

    let mut page = Page {
        lines: vec![Line::default(); CARD_GAP as usize],
        layout: PageLayout {
            viewport,
            x_offset,
            card_width,
            ..PageLayout::default()
        },
    };

    for id in ctx.state.in_flow() {
        // The expanded card keeps its place in the flow behind the overlay,
        // so closing the overlay does not move anything.
        let view = match ctx.state.view(id) {
            CardView::Expanded => CardView::Open,
            view => view,
        };
        let focused = ctx.focus == Some(id);
        let frame = build_card(
            id,
            ctx.portfolio,
            ctx.theme,
            card_width,
            CardOptions {
                view,
                focused,
                highlighted: ctx.highlight == Some(id),
                padding: FLOW_PADDING,
                body: BodyOptions {
                    emphasis: false,
                    selected_link: if focused { ctx.selected_link } else { None },
                },
            },
        );

        let top = page.lines.len() as u16;
        let height = frame.height();
        page.lines.extend(frame.lines.into_iter().map(|line| {
            let mut spans = Vec::with_capacity(line.spans.len() + 1);
            spans.push(Span::raw(indent.clone()));
            spans.extend(line.spans);
            Line::from(spans)
        }));
        page.lines
            .extend(std::iter::repeat(Line::default()).take(CARD_GAP as usize));
        page.layout.cards.push(CardSlot {
            id,
            top,
            height,
            line_links: frame.line_links,
            links: frame.links,
        });
    }

    page.lines.push(footer(ctx));
    page.lines.push(Line::default());
    page.layout.total_height = page.lines.len() as u16;
    page
}

/// Draw the visible window of the page.
pub fn render_page(frame: &mut Frame, page: &Page, theme: &Theme, scroll: u16) {
    let area = page.layout.viewport;
    let start = (scroll as usize).min(page.lines.len());
    let end = (start + area.height as usize).min(page.lines.len());
    let visible: Vec<Line<'static>> = page.lines[start..end].to_vec();

    let paragraph =
        Paragraph::new(visible).style(Style::default().fg(theme.page_fg).bg(theme.page_bg));
    frame.render_widget(paragraph, area);
}
