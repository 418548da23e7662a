use std::fmt;

/// High-level actions a key press can trigger.
///
/// Card commands act on the expanded card while the overlay is open and on
/// the focused card otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TogglePin,
    ToggleMinimize,
    ToggleExpand,
    /// Clear the expanded card
    Cancel,
    /// Restore the n-th (0-based) pinned card from the header
    RestorePinned(usize),

    FocusNext,
    FocusPrev,

    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,

    NextLink,
    PrevLink,
    OpenLink,
    DownloadResume,

    Quit,
}

impl Action {
    /// Parse an action name as used in config keybindings.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "toggle_pin" => Self::TogglePin,
            "toggle_minimize" => Self::ToggleMinimize,
            "toggle_expand" => Self::ToggleExpand,
            "cancel" => Self::Cancel,
            "focus_next" => Self::FocusNext,
            "focus_prev" => Self::FocusPrev,
            "scroll_up" => Self::ScrollUp,
            "scroll_down" => Self::ScrollDown,
            "page_up" => Self::PageUp,
            "page_down" => Self::PageDown,
            "scroll_top" => Self::ScrollTop,
            "scroll_bottom" => Self::ScrollBottom,
            "next_link" => Self::NextLink,
            "prev_link" => Self::PrevLink,
            "open_link" => Self::OpenLink,
            "download_resume" => Self::DownloadResume,
            "quit" => Self::Quit,
            other => {
                // restore_1 .. restore_9
                let n: usize = other.strip_prefix("restore_")?.parse().ok()?;
                if !(1..=9).contains(&n) {
                    return None;
                }
                Self::RestorePinned(n - 1)
            }
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TogglePin => "toggle_pin",
            Self::ToggleMinimize => "toggle_minimize",
            Self::ToggleExpand => "toggle_expand",
            Self::Cancel => "cancel",
            Self::RestorePinned(n) => return write!(f, "restore_{}", n + 1),
            Self::FocusNext => "focus_next",
            Self::FocusPrev => "focus_prev",
            Self::ScrollUp => "scroll_up",
            Self::ScrollDown => "scroll_down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::ScrollTop => "scroll_top",
            Self::ScrollBottom => "scroll_bottom",
            Self::NextLink => "next_link",
            Self::PrevLink => "prev_link",
            Self::OpenLink => "open_link",
            Self::DownloadResume => "download_resume",
            Self::Quit => "quit",
        };
        f.write_str(name)
    }
}
