//! Frame rendering and layout commit

use super::App;
use crate::view::header::{render_header, HEADER_HEIGHT};
use crate::view::overlay::{render_overlay, OverlayLayout};
use crate::view::page::{build_page, render_page, PageContext};
use crate::view::status::render_status;
use ratatui::layout::Rect;
use ratatui::Frame;

impl App {
    /// Draw the whole screen and remember the layouts it produced.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let status_height = area.height.min(1);
        let main = Rect::new(area.x, area.y, area.width, area.height - status_height);
        let status_area = Rect::new(area.x, main.bottom(), area.width, status_height);
        let header_height = HEADER_HEIGHT.min(main.height);
        let header_area = Rect::new(main.x, main.y, main.width, header_height);
        let viewport = Rect::new(
            main.x,
            main.y + header_height,
            main.width,
            main.height - header_height,
        );

        let now = self.time.now();
        let ctx = PageContext {
            portfolio: &self.portfolio,
            theme: &self.theme,
            state: &self.state,
            focus: self.focus,
            highlight: self.navigator.highlighted(now),
            selected_link: if self.state.expanded().is_none() {
                self.selected_link
            } else {
                None
            },
            year: self.time.current_year(),
        };
        let page = build_page(&ctx, viewport);
        render_page(frame, &page, &self.theme, self.navigator.scroll());
        self.page_layout = page.layout;

        self.header_layout = render_header(frame, header_area, &self.theme, &self.state.pinned());

        self.overlay_layout = match self.state.expanded() {
            Some(card) if main.height > 0 => {
                let layout = render_overlay(
                    frame,
                    main,
                    card,
                    &self.portfolio,
                    &self.theme,
                    self.selected_link,
                    self.overlay_scroll,
                );
                self.overlay_scroll = layout.scroll;
                layout
            }
            _ => OverlayLayout::default(),
        };

        render_status(
            frame,
            status_area,
            &self.theme,
            self.status.as_ref(),
            self.state.expanded().is_some(),
        );
    }

    /// Run after a frame has been drawn: the frame's layout is now committed,
    /// so pending navigation can resolve against it.
    /// Returns true if another frame is needed.
    pub fn commit_layout(&mut self) -> bool {
        self.navigator
            .commit_layout(&self.page_layout, self.time.now(), &self.config.navigation)
    }
}
