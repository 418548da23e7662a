//! Main event loop

use super::App;
use anyhow::Result as AnyhowResult;
use crossterm::event::Event;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::Duration;

/// Run until the app asks to quit.
///
/// `poll_event` waits up to the given timeout for the next terminal event.
/// Each drawn frame is followed by a layout commit; continuations that change
/// the scroll position request another frame.
pub fn run_event_loop<B, F>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    mut poll_event: F,
) -> AnyhowResult<()>
where
    B: Backend,
    F: FnMut(Duration) -> AnyhowResult<Option<Event>>,
{
    app.activate();
    let mut needs_render = true;

    loop {
        if app.tick() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render {
            terminal.draw(|frame| app.render(frame))?;
            needs_render = app.commit_layout();
        }

        let timeout = if needs_render {
            Duration::ZERO
        } else {
            app.poll_timeout()
        };
        let Some(event) = poll_event(timeout)? else {
            continue;
        };
        if app.handle_event(event) {
            needs_render = true;
        }
    }

    app.deactivate();
    Ok(())
}
