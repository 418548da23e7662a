//! Header bar: the `$ portfolio` prompt and one restore button per pinned card

use super::theme::Theme;
use super::wrap::str_width;
use crate::card::CardId;
use crate::state::PinnedCard;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Rows taken by the header (prompt row and rule).
pub const HEADER_HEIGHT: u16 = 2;

const PROMPT: &str = " $ portfolio";

/// A restore button as drawn, for mouse click detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderButton {
    pub id: CardId,
    pub x: u16,
    pub width: u16,
}

/// Layout information returned from header rendering
#[derive(Debug, Clone, Default)]
pub struct HeaderLayout {
    pub area: Rect,
    /// Buttons in pin order. Buttons that do not fit are not drawn.
    pub buttons: Vec<HeaderButton>,
}

impl HeaderLayout {
    pub fn hit_test(&self, col: u16, row: u16) -> Option<CardId> {
        if row != self.area.y {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| col >= b.x && col < b.x + b.width)
            .map(|b| b.id)
    }
}

fn button_label(index: usize, card: &PinnedCard) -> String {
    // Only the first nine buttons have a digit shortcut
    if index < 9 {
        format!(" {} {} ", index + 1, card.title)
    } else {
        format!(" {} ", card.title)
    }
}

/// Render the header and return where each restore button landed.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    pinned: &[PinnedCard],
) -> HeaderLayout {
    let base = Style::default().fg(theme.header_fg).bg(theme.header_bg);
    let button_style = Style::default()
        .fg(theme.button_fg)
        .bg(theme.button_bg)
        .add_modifier(Modifier::BOLD);

    let mut layout = HeaderLayout {
        area,
        buttons: Vec::new(),
    };
    let mut spans = vec![Span::styled(
        PROMPT,
        Style::default()
            .fg(theme.prompt_fg)
            .bg(theme.header_bg)
            .add_modifier(Modifier::BOLD),
    )];
    let mut x = area.x + str_width(PROMPT) as u16 + 2;
    spans.push(Span::styled("  ", base));

    for (index, card) in pinned.iter().enumerate() {
        let label = button_label(index, card);
        let width = str_width(&label) as u16;
        if x + width > area.right() {
            tracing::debug!("header full, {} pinned cards not shown", pinned.len() - index);
            break;
        }
        layout.buttons.push(HeaderButton {
            id: card.id,
            x,
            width,
        });
        spans.push(Span::styled(label, button_style));
        spans.push(Span::styled(" ", base));
        x += width + 1;
    }

    let rule = "─".repeat(area.width as usize);
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            rule,
            Style::default().fg(theme.header_rule_fg).bg(theme.header_bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(base), area);
    layout
}
