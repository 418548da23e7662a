//! Status line: key hints, or the latest transient message

use super::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const FLOW_HINTS: &str =
    " tab focus · p pin · m min · e expand · 1-9 restore · [ ] link · enter open · d resume · q quit";
const OVERLAY_HINTS: &str = " esc close · e collapse · ↑↓ scroll · [ ] link · enter open · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    message: Option<&StatusMessage>,
    overlay_open: bool,
) {
    let base = Style::default()
        .fg(theme.status_bar_fg)
        .bg(theme.status_bar_bg);

    let line = match message {
        Some(message) => {
            let style = match message.kind {
                StatusKind::Info => base,
                StatusKind::Error => base.fg(theme.status_error_fg),
            };
            Line::from(Span::styled(format!(" {}", message.text), style))
        }
        None if overlay_open => Line::from(Span::styled(OVERLAY_HINTS, base)),
        None => Line::from(Span::styled(FLOW_HINTS, base)),
    };
    frame.render_widget(Paragraph::new(line).style(base), area);
}
