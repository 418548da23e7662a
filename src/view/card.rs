//! Card window chrome
//!
//! A card is drawn as a rounded box: top border, a title bar carrying the
//! three window controls and the card's `~/title`, a separator, the padded
//! body, and the bottom border. A collapsed card keeps only the title bar.
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ ● ● ●  ~/education           │
//! ├──────────────────────────────┤
//! │                              │
//! │  $ education                 │
//! ╰──────────────────────────────╯
//! ```

use super::blocks::{card_body, BodyOptions};
use super::theme::Theme;
use super::wrap::{str_width, truncate};
use crate::card::CardId;
use crate::content::Portfolio;
use crate::services::links::LinkTarget;
use crate::state::CardView;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Row of the title bar within a card.
pub const TITLE_BAR_ROW: u16 = 1;

/// Window controls on the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pin,
    Minimize,
    Expand,
}

/// Column of each control dot, relative to the card's left edge.
const CONTROL_COLUMNS: [(u16, Control); 3] = [
    (2, Control::Pin),
    (4, Control::Minimize),
    (6, Control::Expand),
];

/// The control drawn at a title-bar column, if any.
pub fn control_at(local_col: u16) -> Option<Control> {
    CONTROL_COLUMNS
        .iter()
        .find(|(col, _)| *col == local_col)
        .map(|(_, control)| *control)
}

/// How a single card should be decorated.
#[derive(Debug, Clone, Copy)]
pub struct CardOptions {
    pub view: CardView,
    pub focused: bool,
    pub highlighted: bool,
    /// Columns of blank space between the side borders and the body
    pub padding: u16,
    pub body: BodyOptions,
}

/// A fully decorated card.
#[derive(Debug, Clone, Default)]
pub struct CardFrame {
    pub lines: Vec<Line<'static>>,
    /// Link index per line, aligned with `lines`
    pub line_links: Vec<Option<usize>>,
    pub links: Vec<LinkTarget>,
}

impl CardFrame {
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

fn border_style(theme: &Theme, options: &CardOptions) -> Style {
    let style = Style::default().bg(theme.card_bg);
    if options.highlighted {
        style
            .fg(theme.highlight_border_fg)
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else if options.focused || options.view == CardView::Expanded {
        style.fg(theme.focus_border_fg)
    } else {
        style.fg(theme.border_fg)
    }
}

fn rule(width: usize, left: &str, right: &str, style: Style) -> Line<'static> {
    let fill = "─".repeat(width.saturating_sub(2));
    Line::from(Span::styled(format!("{left}{fill}{right}"), style))
}

fn title_bar(
    card: CardId,
    theme: &Theme,
    width: usize,
    border: Style,
    options: &CardOptions,
) -> Line<'static> {
    let dot = |fg, enabled: bool| {
        if enabled {
            Span::styled("●", Style::default().fg(fg).bg(theme.card_bg))
        } else {
            Span::styled("○", Style::default().fg(theme.disabled_dot_fg).bg(theme.card_bg))
        }
    };
    let gap = || Span::styled(" ", Style::default().bg(theme.card_bg));
    let minimize_enabled = options.view != CardView::Expanded;

    // Border and dots take nine columns; keep a blank column before the right border
    let label = truncate(&format!("~/{}", card.title()), width.saturating_sub(11));
    let fill = width.saturating_sub(10 + str_width(&label));

    Line::from(vec![
        Span::styled("│", border),
        gap(),
        dot(theme.pin_dot_fg, true),
        gap(),
        dot(theme.minimize_dot_fg, minimize_enabled),
        gap(),
        dot(theme.expand_dot_fg, true),
        gap(),
        gap(),
        Span::styled(
            label,
            Style::default().fg(theme.title_fg).bg(theme.card_bg),
        ),
        Span::styled(" ".repeat(fill), Style::default().bg(theme.card_bg)),
        Span::styled("│", border),
    ])
}

/// Wrap a body line in side borders and padding, filling it to `width`.
fn framed(
    line: Line<'static>,
    theme: &Theme,
    width: usize,
    padding: usize,
    border: Style,
) -> Line<'static> {
    let inner = width.saturating_sub(2 + 2 * padding);
    let fill = inner.saturating_sub(line.width());
    let background = Style::default().bg(theme.card_bg);
    let line_style = line.style;

    let mut spans = Vec::with_capacity(line.spans.len() + 4);
    spans.push(Span::styled("│", border));
    spans.push(Span::styled(" ".repeat(padding), background));
    spans.extend(line.spans.into_iter().map(|span| {
        let style = background.patch(line_style).patch(span.style);
        Span::styled(span.content, style)
    }));
    spans.push(Span::styled(" ".repeat(fill), background.patch(line_style)));
    spans.push(Span::styled(" ".repeat(padding), background));
    spans.push(Span::styled("│", border));
    Line::from(spans)
}

/// Build the decorated card. Hidden cards produce an empty frame.
pub fn build_card(
    card: CardId,
    portfolio: &Portfolio,
    theme: &Theme,
    width: u16,
    options: CardOptions,
) -> CardFrame {
    if options.view == CardView::Hidden {
        return CardFrame::default();
    }

    let width = width as usize;
    let padding = options.padding as usize;
    let border = border_style(theme, &options);

    let mut frame = CardFrame::default();
    frame.lines.push(rule(width, "╭", "╮", border));
    frame.lines.push(title_bar(card, theme, width, border, &options));

    if options.view != CardView::Collapsed {
        let inner = width.saturating_sub(2 + 2 * padding) as u16;
        let body = card_body(card, portfolio, theme, inner, options.body);

        frame.lines.push(rule(width, "├", "┤", border));
        frame.lines.push(framed(Line::default(), theme, width, padding, border));
        frame.line_links = vec![None; frame.lines.len()];

        for (line, link) in body.lines.into_iter().zip(body.line_links) {
            frame.lines.push(framed(line, theme, width, padding, border));
            frame.line_links.push(link);
        }
        frame.links = body.links;
        frame.lines.push(framed(Line::default(), theme, width, padding, border));
    }

    frame.lines.push(rule(width, "╰", "╯", border));
    frame.line_links.resize(frame.lines.len(), None);
    frame
}
