//! The root view
//!
//! `App` owns the interaction state record and everything derived from the
//! last committed frame. Card transitions go through here so that focus,
//! link selection, the overlay scroll and scheduled navigation stay
//! consistent with the state record.

mod input_dispatch;
mod render;
pub mod runtime;

use crate::card::CardId;
use crate::config::Config;
use crate::content::Portfolio;
use crate::input::keybindings::KeybindingResolver;
use crate::input::listeners::{KeyListeners, Subscription};
use crate::input::Action;
use crate::navigation::{AfterLayout, Navigator};
use crate::services::links::{LinkOpener, LinkTarget, ResumeDownload};
use crate::services::time_source::SharedTimeSource;
use crate::state::ViewState;
use crate::view::blocks::card_links;
use crate::view::header::HeaderLayout;
use crate::view::overlay::OverlayLayout;
use crate::view::page::PageLayout;
use crate::view::status::StatusMessage;
use crate::view::theme::Theme;
use crossterm::event::KeyCode;
use std::time::Duration;

/// Poll timeout while something animates.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll timeout while idle.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Rows moved per scroll step (arrow keys, mouse wheel).
const SCROLL_STEP: i32 = 1;
const WHEEL_STEP: i32 = 3;

pub struct App {
    config: Config,
    portfolio: Portfolio,
    theme: Theme,
    state: ViewState,
    navigator: Navigator,
    keybindings: KeybindingResolver,
    listeners: KeyListeners,
    /// Cancel-key subscription, held while the view is active
    activation: Option<Subscription>,
    focus: Option<CardId>,
    selected_link: Option<usize>,
    overlay_scroll: u16,
    page_layout: PageLayout,
    header_layout: HeaderLayout,
    overlay_layout: OverlayLayout,
    status: Option<StatusMessage>,
    time: SharedTimeSource,
    opener: Box<dyn LinkOpener>,
    resume: ResumeDownload,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        portfolio: Portfolio,
        resume: ResumeDownload,
        time: SharedTimeSource,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let theme = Theme::from_name(&config.theme);
        let keybindings = KeybindingResolver::new(&config.keybindings);
        tracing::info!("Using theme '{}'", theme.name);

        Self {
            config,
            portfolio,
            theme,
            state: ViewState::new(),
            navigator: Navigator::new(),
            keybindings,
            listeners: KeyListeners::new(),
            activation: None,
            focus: None,
            selected_link: None,
            overlay_scroll: 0,
            page_layout: PageLayout::default(),
            header_layout: HeaderLayout::default(),
            overlay_layout: OverlayLayout::default(),
            status: None,
            time,
            opener,
            resume,
            should_quit: false,
        }
    }

    /// Acquire the global cancel-key listener. Calling this again replaces
    /// the previous subscription instead of adding a second one.
    pub fn activate(&mut self) {
        self.activation = Some(self.listeners.subscribe(KeyCode::Esc, Action::Cancel));
        tracing::debug!("view activated ({} global listeners)", self.listeners.len());
    }

    /// Release the global cancel-key listener.
    pub fn deactivate(&mut self) {
        self.activation = None;
        tracing::debug!("view deactivated ({} global listeners)", self.listeners.len());
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    /// Handle to the global listener registry.
    pub fn listeners(&self) -> &KeyListeners {
        &self.listeners
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn focus(&self) -> Option<CardId> {
        self.focus
    }

    pub fn selected_link(&self) -> Option<usize> {
        self.selected_link
    }

    pub fn scroll(&self) -> u16 {
        self.navigator.scroll()
    }

    pub fn overlay_scroll(&self) -> u16 {
        self.overlay_scroll
    }

    pub fn highlighted(&self) -> Option<CardId> {
        self.navigator.highlighted(self.time.now())
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn page_layout(&self) -> &PageLayout {
        &self.page_layout
    }

    pub fn header_layout(&self) -> &HeaderLayout {
        &self.header_layout
    }

    pub fn overlay_layout(&self) -> &OverlayLayout {
        &self.overlay_layout
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How long the event loop may wait for input.
    pub fn poll_timeout(&self) -> Duration {
        if self.navigator.is_active() || self.navigator.has_pending() {
            FRAME_DURATION
        } else {
            IDLE_POLL
        }
    }

    /// Advance time-based state. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.navigator.tick(self.time.now())
    }

    // Card transitions

    pub fn toggle_pin(&mut self, id: CardId) {
        let was_expanded = self.state.is_expanded(id);
        self.state.toggle_pin(id);

        if self.state.is_pinned(id) {
            tracing::info!("pinned {}", id);
            if was_expanded {
                self.reset_overlay();
            }
            if self.focus == Some(id) {
                self.focus = self.next_in_flow(id);
                self.selected_link = None;
            }
        } else {
            tracing::info!("unpinned {}", id);
        }
    }

    pub fn toggle_minimize(&mut self, id: CardId) {
        if self.state.toggle_minimize(id) {
            tracing::debug!("{} minimized: {}", id, self.state.is_minimized(id));
            if self.focus == Some(id) && self.state.is_minimized(id) {
                self.selected_link = None;
            }
        } else {
            tracing::debug!("minimize of {} rejected", id);
        }
    }

    pub fn toggle_expand(&mut self, id: CardId) {
        if !self.state.toggle_expand(id) {
            tracing::debug!("expand of {} rejected", id);
            return;
        }
        self.reset_overlay();
        if self.state.is_expanded(id) {
            tracing::info!("expanded {}", id);
            self.focus = Some(id);
        } else {
            tracing::info!("collapsed {}", id);
            self.navigator.schedule(AfterLayout::EnsureVisible(id));
        }
    }

    /// Clear the expanded card. Idempotent.
    pub fn cancel(&mut self) {
        let expanded = self.state.expanded();
        if self.state.cancel() {
            tracing::info!("cancelled overlay");
            self.reset_overlay();
            if let Some(id) = expanded {
                self.navigator.schedule(AfterLayout::EnsureVisible(id));
            }
        }
    }

    /// Put a pinned card back into the flow, then scroll to and highlight
    /// it once the next frame has been laid out.
    pub fn restore(&mut self, id: CardId) {
        if !self.state.restore(id) {
            tracing::debug!("restore of {} ignored, not pinned", id);
            return;
        }
        tracing::info!("restoring {}", id);
        self.focus = Some(id);
        self.selected_link = None;
        self.navigator.schedule(AfterLayout::Reveal(id));
    }

    /// Restore the n-th header button (0-based).
    pub fn restore_nth(&mut self, index: usize) {
        match self.state.pinned().get(index) {
            Some(card) => self.restore(card.id),
            None => tracing::debug!("no pinned card at position {}", index + 1),
        }
    }

    fn reset_overlay(&mut self) {
        self.overlay_scroll = 0;
        self.selected_link = None;
    }

    // Focus

    fn next_in_flow(&self, id: CardId) -> Option<CardId> {
        let flow = self.state.in_flow();
        flow.iter()
            .copied()
            .find(|card| card.flow_index() > id.flow_index())
            .or_else(|| flow.first().copied())
    }

    fn move_focus(&mut self, forward: bool) {
        let flow = self.state.in_flow();
        if flow.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focus
            .and_then(|focus| flow.iter().position(|card| *card == focus));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => flow.len() - 1,
            (Some(i), true) => (i + 1) % flow.len(),
            (Some(i), false) => (i + flow.len() - 1) % flow.len(),
        };
        let card = flow[next];
        self.focus = Some(card);
        self.selected_link = None;
        self.navigator.schedule(AfterLayout::EnsureVisible(card));
    }

    /// Card that card commands act on: the expanded card, else the focused one.
    fn target_card(&self) -> Option<CardId> {
        self.state.expanded().or(self.focus)
    }

    fn with_target(&mut self, action: impl FnOnce(&mut Self, CardId)) {
        match self.target_card() {
            Some(card) => action(self, card),
            None => self.status = Some(StatusMessage::info("press tab to focus a card")),
        }
    }

    // Scrolling

    fn scroll_by(&mut self, delta: i32) {
        if self.state.expanded().is_some() {
            let max = self.overlay_layout.max_scroll as i32;
            self.overlay_scroll = (self.overlay_scroll as i32 + delta).clamp(0, max) as u16;
        } else {
            self.navigator
                .scroll_by(delta, self.page_layout.max_scroll());
        }
    }

    fn page_height(&self) -> i32 {
        let height = if self.state.expanded().is_some() {
            self.overlay_layout.body_area.height
        } else {
            self.page_layout.viewport.height
        };
        (height as i32 - 1).max(1)
    }

    // Links

    fn select_link(&mut self, forward: bool) {
        if self.target_card().is_none() {
            self.focus = self.state.in_flow().first().copied();
        }
        let Some(card) = self.target_card() else {
            return;
        };
        if !self.state.is_content_visible(card) {
            return;
        }
        let count = card_links(card, &self.portfolio).len();
        if count == 0 {
            self.status = Some(StatusMessage::info(format!("no links in {}", card)));
            return;
        }
        let next = match (self.selected_link, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.selected_link = Some(next);

        if self.state.expanded().is_some() {
            self.overlay_link_into_view(next);
        } else {
            self.navigator
                .schedule(AfterLayout::EnsureLinkVisible(card, next));
        }
    }

    fn overlay_link_into_view(&mut self, link: usize) {
        let Some(line) = self.overlay_layout.link_line(link) else {
            return;
        };
        let height = self.overlay_layout.body_area.height;
        if line < self.overlay_scroll {
            self.overlay_scroll = line;
        } else if height > 0 && line >= self.overlay_scroll + height {
            self.overlay_scroll = line + 1 - height;
        }
    }

    fn open_selected_link(&mut self) {
        let (Some(card), Some(index)) = (self.target_card(), self.selected_link) else {
            self.status = Some(StatusMessage::info("select a link with [ or ]"));
            return;
        };
        match card_links(card, &self.portfolio).get(index).cloned() {
            Some(target) => self.activate_link(&target),
            None => self.selected_link = None,
        }
    }

    /// Follow a link: open it externally, or save the resume.
    pub fn activate_link(&mut self, target: &LinkTarget) {
        let Some(uri) = target.uri() else {
            self.download_resume();
            return;
        };
        match self.opener.open(&uri) {
            Ok(()) => self.status = Some(StatusMessage::info(format!("opened {}", uri))),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", uri, e);
                self.status = Some(StatusMessage::error(format!("could not open {}: {}", uri, e)));
            }
        }
    }

    pub fn download_resume(&mut self) {
        match self.resume.save() {
            Ok(path) => {
                tracing::info!("Resume saved to {}", path.display());
                self.status = Some(StatusMessage::info(format!(
                    "resume saved to {}",
                    path.display()
                )));
            }
            Err(e) => {
                tracing::warn!("Resume download failed: {:#}", e);
                self.status = Some(StatusMessage::error(format!("download failed: {:#}", e)));
            }
        }
    }

    /// Apply a resolved action.
    pub fn handle_action(&mut self, action: Action) {
        tracing::trace!("action: {}", action);
        match action {
            Action::TogglePin => self.with_target(Self::toggle_pin),
            Action::ToggleMinimize => self.with_target(Self::toggle_minimize),
            Action::ToggleExpand => self.with_target(Self::toggle_expand),
            Action::Cancel => self.cancel(),
            Action::RestorePinned(index) => self.restore_nth(index),
            Action::FocusNext => self.move_focus(true),
            Action::FocusPrev => self.move_focus(false),
            Action::ScrollUp => self.scroll_by(-SCROLL_STEP),
            Action::ScrollDown => self.scroll_by(SCROLL_STEP),
            Action::PageUp => self.scroll_by(-self.page_height()),
            Action::PageDown => self.scroll_by(self.page_height()),
            Action::ScrollTop => self.scroll_by(-(u16::MAX as i32)),
            Action::ScrollBottom => self.scroll_by(u16::MAX as i32),
            Action::NextLink => self.select_link(true),
            Action::PrevLink => self.select_link(false),
            Action::OpenLink => self.open_selected_link(),
            Action::DownloadResume => self.download_resume(),
            Action::Quit => {
                tracing::info!("quit requested");
                self.should_quit = true;
            }
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("focus", &self.focus)
            .field("scroll", &self.navigator.scroll())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::links::RecordingLinkOpener;
    use crate::services::time_source::TestTimeSource;
    use std::path::PathBuf;

    fn app() -> App {
        App::new(
            Config::default(),
            Portfolio::default(),
            ResumeDownload::new(
                PathBuf::from("/nonexistent/resume.pdf"),
                std::env::temp_dir(),
                "resume.pdf",
            ),
            TestTimeSource::shared(),
            Box::new(RecordingLinkOpener::new()),
        )
    }

    #[test]
    fn test_activation_holds_one_listener() {
        let mut app = app();
        assert!(app.listeners().is_empty());
        app.activate();
        app.activate();
        assert_eq!(app.listeners().len(), 1);
        app.deactivate();
        assert!(app.listeners().is_empty());
    }

    #[test]
    fn test_dropping_app_releases_listener() {
        let mut app = app();
        app.activate();
        let listeners = app.listeners().clone();
        assert_eq!(listeners.len(), 1);
        drop(app);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_pinning_focused_card_moves_focus() {
        let mut app = app();
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus(), Some(CardId::Whoami));
        app.handle_action(Action::TogglePin);
        assert!(app.state().is_pinned(CardId::Whoami));
        assert_eq!(app.focus(), Some(CardId::Education));
    }

    #[test]
    fn test_focus_wraps_around_flow() {
        let mut app = app();
        app.handle_action(Action::FocusPrev);
        assert_eq!(app.focus(), Some(CardId::Contact));
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus(), Some(CardId::Whoami));
    }

    #[test]
    fn test_card_commands_need_a_target() {
        let mut app = app();
        app.handle_action(Action::ToggleExpand);
        assert_eq!(app.state().expanded(), None);
        assert!(app.status().is_some());
    }

    #[test]
    fn test_commands_target_expanded_card() {
        let mut app = app();
        app.toggle_expand(CardId::Projects);
        app.focus = Some(CardId::Whoami);
        app.handle_action(Action::TogglePin);
        assert!(app.state().is_pinned(CardId::Projects));
        assert_eq!(app.state().expanded(), None);
        assert!(!app.state().is_pinned(CardId::Whoami));
    }

    #[test]
    fn test_restore_of_unpinned_card_is_noop() {
        let mut app = app();
        app.restore(CardId::Education);
        assert_eq!(app.focus(), None);
        assert_eq!(app.poll_timeout(), IDLE_POLL);
    }

    #[test]
    fn test_restore_schedules_reveal() {
        let mut app = app();
        app.toggle_pin(CardId::Education);
        app.handle_action(Action::RestorePinned(0));
        assert!(!app.state().is_pinned(CardId::Education));
        assert_eq!(app.focus(), Some(CardId::Education));
        assert_eq!(app.poll_timeout(), FRAME_DURATION);
    }

    #[test]
    fn test_link_selection_cycles() {
        let mut app = app();
        app.focus = Some(CardId::Projects);
        app.handle_action(Action::NextLink);
        assert_eq!(app.selected_link(), Some(0));
        app.handle_action(Action::PrevLink);
        app.handle_action(Action::PrevLink);
        assert_eq!(app.selected_link(), Some(1));
    }

    #[test]
    fn test_missing_resume_reports_error() {
        let mut app = app();
        app.handle_action(Action::DownloadResume);
        let status = app.status().unwrap();
        assert_eq!(status.kind, crate::view::status::StatusKind::Error);
        assert!(status.text.contains("resume asset not found"));
    }
}
