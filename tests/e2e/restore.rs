// End-to-end tests for pinning cards to the header and restoring them

use crate::common::harness::PortfolioTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Duration;
use termfolio::card::CardId;
use termfolio::config::{DEFAULT_HIGHLIGHT_DURATION_MS, DEFAULT_SCROLL_ANIMATION_MS};
use termfolio::view::header::HEADER_HEIGHT;
use termfolio::view::theme::Theme;

/// Focus a card by tabbing from the top of the flow.
fn focus(harness: &mut PortfolioTestHarness, card: CardId) {
    while harness.app().focus() != Some(card) {
        harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    }
}

#[test]
fn test_pin_moves_card_to_header() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.assert_screen_contains("~/education");

    focus(&mut harness, CardId::Education);
    harness.press('p').unwrap();

    assert!(harness.app().state().is_pinned(CardId::Education));
    harness.assert_screen_not_contains("~/education");
    let (_, row) = harness.find_text("1 education").unwrap();
    assert_eq!(row, 0, "restore button belongs on the header row");
}

#[test]
fn test_header_buttons_follow_pin_order() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Projects);
    harness.press('p').unwrap();
    focus(&mut harness, CardId::Whoami);
    harness.press('p').unwrap();

    let header = harness.screen_row(0);
    let projects = header.find("1 projects").unwrap();
    let whoami = header.find("2 whoami").unwrap();
    assert!(projects < whoami, "header: {header}");
}

#[test]
fn test_restore_scrolls_card_below_header_and_highlights() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Education);
    harness.press('p').unwrap();

    harness.press('1').unwrap();
    assert!(!harness.app().state().is_pinned(CardId::Education));
    harness.assert_screen_not_contains("1 education");
    assert_eq!(harness.app().highlighted(), Some(CardId::Education));

    // The scroll animation only moves with time
    harness
        .advance(Duration::from_millis(DEFAULT_SCROLL_ANIMATION_MS))
        .unwrap();
    let margin = harness.app().config().navigation.scroll_margin;
    let (_, title_row) = harness.find_text("~/education").unwrap();
    assert_eq!(title_row, HEADER_HEIGHT + margin + 1);

    let theme = Theme::default();
    let border_row = title_row - 1;
    assert_eq!(harness.cell_fg(0, border_row), theme.highlight_border_fg);

    harness
        .advance(Duration::from_millis(DEFAULT_HIGHLIGHT_DURATION_MS))
        .unwrap();
    assert_eq!(harness.app().highlighted(), None);
    assert_eq!(harness.cell_fg(0, border_row), theme.focus_border_fg);
}

#[test]
fn test_restore_by_clicking_header_button() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();

    // Pin dot of the whoami card
    let (_, title_row) = harness.find_text("~/whoami").unwrap();
    harness.mouse_click(2, title_row).unwrap();
    assert!(harness.app().state().is_pinned(CardId::Whoami));

    let (col, row) = harness.find_text("1 whoami").unwrap();
    harness.mouse_click(col, row).unwrap();

    assert!(!harness.app().state().is_pinned(CardId::Whoami));
    assert_eq!(harness.app().highlighted(), Some(CardId::Whoami));
    harness.assert_screen_contains("~/whoami");
}

#[test]
fn test_restore_key_without_pinned_card_is_noop() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    let before = harness.app().state().clone();
    harness.press('3').unwrap();
    assert_eq!(harness.app().state(), &before);
    assert_eq!(harness.app().highlighted(), None);
    assert_eq!(harness.app().scroll(), 0);
}

#[test]
fn test_highlight_before_animation_finishes() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Experience);
    harness.press('p').unwrap();
    harness.press('1').unwrap();

    harness.advance(Duration::from_millis(50)).unwrap();
    assert_eq!(harness.app().highlighted(), Some(CardId::Experience));
    let midway = harness.app().scroll();
    harness
        .advance(Duration::from_millis(DEFAULT_SCROLL_ANIMATION_MS))
        .unwrap();
    assert!(harness.app().scroll() >= midway);
}
