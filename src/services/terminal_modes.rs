//! Terminal mode management
//!
//! The UI owns the terminal while it runs: raw mode, the alternate screen,
//! unambiguous escape codes (so a lone Esc arrives immediately) and,
//! optionally, mouse capture. `TerminalModes` is a stack of the modes that
//! were actually switched on; `undo` switches them off again in reverse order,
//! and dropping the guard does the same. `emergency_cleanup` is the untracked
//! variant used by the panic hook.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use std::io::{self, stdout, Write};

/// A terminal mode the portfolio switches on for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raw,
    DisambiguatedKeys,
    AlternateScreen,
    MouseCapture,
}

impl Mode {
    fn switch_on(self) -> io::Result<()> {
        match self {
            Mode::Raw => enable_raw_mode(),
            Mode::DisambiguatedKeys => stdout()
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
                ))
                .map(|_| ()),
            Mode::AlternateScreen => stdout().execute(EnterAlternateScreen).map(|_| ()),
            Mode::MouseCapture => stdout().execute(EnableMouseCapture).map(|_| ()),
        }
    }

    fn switch_off(self) -> io::Result<()> {
        match self {
            Mode::Raw => disable_raw_mode(),
            Mode::DisambiguatedKeys => stdout().execute(PopKeyboardEnhancementFlags).map(|_| ()),
            Mode::AlternateScreen => stdout().execute(LeaveAlternateScreen).map(|_| ()),
            Mode::MouseCapture => stdout().execute(DisableMouseCapture).map(|_| ()),
        }
    }

    /// Whether failing to switch this mode on should abort startup.
    fn required(self) -> bool {
        matches!(self, Mode::Raw | Mode::AlternateScreen)
    }
}

/// Guard over the terminal modes switched on for the UI.
#[derive(Debug, Default)]
pub struct TerminalModes {
    enabled: Vec<Mode>,
}

impl TerminalModes {
    /// Switch on every mode the UI needs.
    ///
    /// Keyboard enhancement and mouse capture are best effort. If a required
    /// mode fails, whatever was already switched on is undone first.
    pub fn enable(mouse: bool) -> Result<Self> {
        let mut modes = Self::default();

        let mut wanted = vec![Mode::Raw];
        match supports_keyboard_enhancement() {
            Ok(true) => wanted.push(Mode::DisambiguatedKeys),
            Ok(false) => tracing::info!("Keyboard enhancement not supported by terminal"),
            Err(e) => tracing::warn!("Failed to query keyboard enhancement support: {}", e),
        }
        wanted.push(Mode::AlternateScreen);
        if mouse {
            wanted.push(Mode::MouseCapture);
        }

        for mode in wanted {
            match mode.switch_on() {
                Ok(()) => {
                    tracing::debug!("Enabled {:?}", mode);
                    modes.enabled.push(mode);
                }
                Err(e) if mode.required() => {
                    tracing::error!("Failed to enable {:?}: {}", mode, e);
                    modes.undo();
                    return Err(e.into());
                }
                Err(e) => tracing::warn!("Failed to enable {:?}: {}", mode, e),
            }
        }

        Ok(modes)
    }

    /// Switch off every enabled mode, most recent first. Safe to call twice.
    pub fn undo(&mut self) {
        while let Some(mode) = self.enabled.pop() {
            if let Err(e) = mode.switch_off() {
                tracing::warn!("Failed to disable {:?}: {}", mode, e);
            } else {
                tracing::debug!("Disabled {:?}", mode);
            }
        }
        let _ = stdout().execute(Show);
        let _ = stdout().flush();
    }

    pub fn is_enabled(&self, mode: Mode) -> bool {
        self.enabled.contains(&mode)
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.undo();
    }
}

/// Unconditionally restore terminal state without tracking.
///
/// Used from the panic hook, where the `TerminalModes` guard is not reachable.
pub fn emergency_cleanup() {
    for mode in [
        Mode::MouseCapture,
        Mode::AlternateScreen,
        Mode::DisambiguatedKeys,
        Mode::Raw,
    ] {
        let _ = mode.switch_off();
    }
    let _ = stdout().execute(Show);
    let _ = stdout().flush();
}
