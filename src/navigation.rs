//! Scroll position, after-layout continuations and the restore highlight
//!
//! Restoring a pinned card puts it back into the flow, but its position is
//! only known once the next frame has been laid out. The restore therefore
//! schedules an [`AfterLayout`] continuation that runs in
//! [`Navigator::commit_layout`], right after the frame is drawn, against the
//! layout that frame actually committed.

use crate::card::CardId;
use crate::config::NavigationConfig;
use crate::view::page::PageLayout;
use std::time::{Duration, Instant};

/// A time-based eased scroll from one offset to another.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnimation {
    from: u16,
    to: u16,
    start: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: u16, to: u16, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub fn target(&self) -> u16 {
        self.to
    }

    /// Scroll offset at `now`, using an ease-out cubic curve.
    pub fn offset_at(&self, now: Instant) -> u16 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round() as u16
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Transient emphasis of a card after it was restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub card: CardId,
    pub expires_at: Instant,
}

/// Work deferred until the next layout commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterLayout {
    /// Smooth-scroll the card to the top of the viewport and highlight it
    Reveal(CardId),
    /// Jump just far enough for the card to be on screen
    EnsureVisible(CardId),
    /// Jump just far enough for a link row of the card to be on screen
    EnsureLinkVisible(CardId, usize),
}

#[derive(Debug, Default)]
pub struct Navigator {
    scroll: u16,
    animation: Option<ScrollAnimation>,
    highlight: Option<Highlight>,
    after_layout: Vec<AfterLayout>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Target of the running animation, if any.
    pub fn scroll_target(&self) -> Option<u16> {
        self.animation.map(|a| a.target())
    }

    /// Jump to an offset. Cancels any running animation.
    pub fn set_scroll(&mut self, offset: u16, max: u16) {
        self.animation = None;
        self.scroll = offset.min(max);
    }

    /// Scroll by `delta` rows. Cancels any running animation.
    pub fn scroll_by(&mut self, delta: i32, max: u16) {
        let next = (self.scroll as i32 + delta).clamp(0, max as i32);
        self.set_scroll(next as u16, max);
    }

    pub fn schedule(&mut self, continuation: AfterLayout) {
        self.after_layout.push(continuation);
    }

    pub fn has_pending(&self) -> bool {
        !self.after_layout.is_empty()
    }

    /// The highlighted card, if its highlight has not expired at `now`.
    pub fn highlighted(&self, now: Instant) -> Option<CardId> {
        self.highlight
            .filter(|h| now < h.expires_at)
            .map(|h| h.card)
    }

    /// Whether anything is changing over time (animation or highlight).
    pub fn is_active(&self) -> bool {
        self.animation.is_some() || self.highlight.is_some()
    }

    /// Advance the animation and expire the highlight.
    /// Returns true if the next frame will look different.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(animation) = self.animation {
            let offset = animation.offset_at(now);
            if offset != self.scroll {
                self.scroll = offset;
                changed = true;
            }
            if animation.is_done(now) {
                self.animation = None;
            }
        }

        if let Some(highlight) = self.highlight {
            if now >= highlight.expires_at {
                tracing::debug!("highlight on {} expired", highlight.card);
                self.highlight = None;
                changed = true;
            }
        }

        changed
    }

    /// Run after a frame has been drawn with `layout`.
    ///
    /// Clamps the scroll offset to the new layout and runs every pending
    /// continuation against it. Returns true if another frame is needed.
    pub fn commit_layout(
        &mut self,
        layout: &PageLayout,
        now: Instant,
        config: &NavigationConfig,
    ) -> bool {
        let max = layout.max_scroll();
        let mut changed = false;

        if self.scroll > max {
            self.scroll = max;
            changed = true;
        }
        if let Some(animation) = self.animation {
            if animation.target() > max {
                self.animation = Some(ScrollAnimation::new(
                    self.scroll,
                    max,
                    now,
                    animation.duration,
                ));
            }
        }

        for continuation in std::mem::take(&mut self.after_layout) {
            changed |= self.run(continuation, layout, now, config);
        }
        changed
    }

    fn run(
        &mut self,
        continuation: AfterLayout,
        layout: &PageLayout,
        now: Instant,
        config: &NavigationConfig,
    ) -> bool {
        let max = layout.max_scroll();
        match continuation {
            AfterLayout::Reveal(card) => {
                let Some(top) = layout.card_top(card) else {
                    tracing::debug!("reveal: {} not in committed layout", card);
                    return false;
                };
                let target = top.saturating_sub(config.scroll_margin).min(max);
                let duration = Duration::from_millis(config.scroll_animation_ms);
                if duration.is_zero() {
                    self.animation = None;
                    self.scroll = target;
                } else {
                    self.animation = Some(ScrollAnimation::new(self.scroll, target, now, duration));
                }
                self.highlight = Some(Highlight {
                    card,
                    expires_at: now + Duration::from_millis(config.highlight_duration_ms),
                });
                tracing::debug!("reveal {} at row {} (scroll {})", card, top, target);
                true
            }
            AfterLayout::EnsureVisible(card) => match layout.slot(card) {
                Some(slot) => self.bring_into_view(slot.top, slot.bottom(), layout, config),
                None => false,
            },
            AfterLayout::EnsureLinkVisible(card, link) => {
                match layout.slot(card).and_then(|slot| slot.link_row(link)) {
                    Some(row) => self.bring_into_view(row, row + 1, layout, config),
                    None => false,
                }
            }
        }
    }

    /// Jump just far enough for page rows `top..bottom` to be on screen,
    /// preferring the top when they do not fit.
    fn bring_into_view(
        &mut self,
        top: u16,
        bottom: u16,
        layout: &PageLayout,
        config: &NavigationConfig,
    ) -> bool {
        let height = layout.viewport.height;
        let target = if top < self.scroll {
            top.saturating_sub(config.scroll_margin)
        } else if bottom > self.scroll + height {
            bottom
                .saturating_sub(height)
                .min(top.saturating_sub(config.scroll_margin))
        } else {
            return false;
        };
        let before = self.scroll;
        self.set_scroll(target, layout.max_scroll());
        self.scroll != before
    }
}
