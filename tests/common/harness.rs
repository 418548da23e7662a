//! Drives a full `App` against ratatui's `TestBackend`
//!
//! Time is a `TestTimeSource`, so scroll animations and highlights advance
//! only when a test calls [`PortfolioTestHarness::advance`]. Links are
//! recorded instead of opened and every directory lives in a temp dir.

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use termfolio::app::App;
use termfolio::config::Config;
use termfolio::config_io::{self, DirectoryContext};
use termfolio::content::Portfolio;
use termfolio::services::links::{RecordingLinkOpener, ResumeDownload};
use termfolio::services::time_source::TestTimeSource;

/// Frames drawn per `render` at most, while layout commits keep asking for more.
const MAX_SETTLE_FRAMES: usize = 4;

pub struct PortfolioTestHarness {
    app: App,
    terminal: Terminal<TestBackend>,
    time: Arc<TestTimeSource>,
    opener: RecordingLinkOpener,
    dir_context: DirectoryContext,
    _temp_dir: TempDir,
}

impl PortfolioTestHarness {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: u16, height: u16, config: Config) -> Result<Self> {
        super::tracing::init_tracing_from_env();

        let temp_dir = TempDir::new()?;
        let dir_context = DirectoryContext::for_testing(temp_dir.path());
        let resume = ResumeDownload::new(
            config_io::resume_source(&config, &dir_context),
            dir_context.download_dir.clone(),
            config.resume.file_name.clone(),
        );
        let time = TestTimeSource::shared();
        let opener = RecordingLinkOpener::new();

        let mut app = App::new(
            config,
            Portfolio::default(),
            resume,
            time.clone(),
            Box::new(opener.clone()),
        );
        app.activate();

        let mut harness = Self {
            app,
            terminal: Terminal::new(TestBackend::new(width, height))?,
            time,
            opener,
            dir_context,
            _temp_dir: temp_dir,
        };
        harness.render()?;
        Ok(harness)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn time(&self) -> &TestTimeSource {
        &self.time
    }

    pub fn dir_context(&self) -> &DirectoryContext {
        &self.dir_context
    }

    /// URIs handed to the link opener so far.
    pub fn opened_links(&self) -> Vec<String> {
        self.opener.opened()
    }

    /// Put a resume asset where the default config looks for it.
    pub fn install_resume(&self, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir_context.resume_path();
        std::fs::create_dir_all(&self.dir_context.data_dir)?;
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Draw a frame and commit its layout, repeating while pending
    /// continuations change what the next frame shows.
    pub fn render(&mut self) -> Result<()> {
        for _ in 0..MAX_SETTLE_FRAMES {
            let app = &mut self.app;
            self.terminal.draw(|frame| app.render(frame))?;
            if !self.app.commit_layout() {
                break;
            }
        }
        Ok(())
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        self.app.handle_key(KeyEvent::new(code, modifiers));
        self.render()
    }

    pub fn press(&mut self, c: char) -> Result<()> {
        self.send_key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn mouse_click(&mut self, col: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::Down(MouseButton::Left), col, row)
    }

    pub fn mouse_scroll_down(&mut self, col: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::ScrollDown, col, row)
    }

    pub fn mouse_scroll_up(&mut self, col: u16, row: u16) -> Result<()> {
        self.mouse(MouseEventKind::ScrollUp, col, row)
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Result<()> {
        self.app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.render()
    }

    /// Move logical time forward, tick, and redraw.
    pub fn advance(&mut self, duration: Duration) -> Result<()> {
        self.time.advance(duration);
        self.app.tick();
        self.render()
    }

    pub fn screen_row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    pub fn screen_to_string(&self) -> String {
        let height = self.terminal.backend().buffer().area.height;
        (0..height)
            .map(|y| self.screen_row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Screen position (column, row) of the first occurrence of `text`.
    pub fn find_text(&self, text: &str) -> Option<(u16, u16)> {
        let buffer = self.terminal.backend().buffer();
        for y in 0..buffer.area.height {
            let mut row = String::new();
            let mut columns = Vec::new();
            for x in 0..buffer.area.width {
                let symbol = buffer[(x, y)].symbol();
                columns.extend(std::iter::repeat(x).take(symbol.len()));
                row.push_str(symbol);
            }
            if let Some(offset) = row.find(text) {
                return Some((columns[offset], y));
            }
        }
        None
    }

    pub fn cell_fg(&self, col: u16, row: u16) -> Color {
        self.terminal.backend().buffer()[(col, row)].fg
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }
}
