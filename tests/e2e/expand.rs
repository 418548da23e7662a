// End-to-end tests for the expanded-card overlay and the cancel key

use crate::common::harness::PortfolioTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use termfolio::card::CardId;
use termfolio::state::CardView;

fn focus(harness: &mut PortfolioTestHarness, card: CardId) {
    while harness.app().focus() != Some(card) {
        harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    }
}

#[test]
fn test_expand_then_escape() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Projects);

    harness.press('e').unwrap();
    assert_eq!(harness.app().state().expanded(), Some(CardId::Projects));
    // The overlay covers the header
    harness.assert_screen_not_contains("$ portfolio");
    assert!(harness.screen_row(1).contains("~/projects"));
    harness.assert_screen_contains("esc close");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().state().expanded(), None);
    harness.assert_screen_contains("$ portfolio");
}

#[test]
fn test_escape_with_nothing_expanded_is_noop() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    let before = harness.app().state().clone();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().state(), &before);
}

#[test]
fn test_minimize_is_inert_while_expanded() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Whoami);
    harness.press('m').unwrap();
    assert!(harness.app().state().is_minimized(CardId::Whoami));
    harness.assert_screen_not_contains("Data Science Student");

    // Expanding a minimized card opens it
    harness.press('e').unwrap();
    harness.assert_screen_contains("Data Science Student");
    assert!(!harness.app().state().is_minimized(CardId::Whoami));

    harness.press('m').unwrap();
    assert!(!harness.app().state().is_minimized(CardId::Whoami));
    assert_eq!(harness.app().state().expanded(), Some(CardId::Whoami));

    // Leaving the overlay returns the card to normal in-flow rendering
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().state().view(CardId::Whoami), CardView::Open);
    harness.assert_screen_contains("~/whoami");
    harness.assert_screen_contains("Data Science Student");
}

#[test]
fn test_expanding_another_card_replaces_the_first() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.app_mut().toggle_expand(CardId::Education);
    harness.app_mut().toggle_expand(CardId::Contact);
    harness.render().unwrap();

    assert_eq!(harness.app().state().expanded(), Some(CardId::Contact));
    assert!(harness.screen_row(1).contains("~/contact"));
}

#[test]
fn test_pinning_the_expanded_card_closes_overlay() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Experience);
    harness.press('e').unwrap();
    harness.press('p').unwrap();

    assert_eq!(harness.app().state().expanded(), None);
    assert!(harness.app().state().is_pinned(CardId::Experience));
    harness.assert_screen_contains("1 experience");
}

#[test]
fn test_overlay_body_scrolls_under_fixed_chrome() {
    let mut harness = PortfolioTestHarness::new(60, 14).unwrap();
    focus(&mut harness, CardId::Projects);
    harness.press('e').unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    let max = harness.app().overlay_layout().max_scroll;
    assert!(max > 0);
    assert_eq!(harness.app().overlay_scroll(), max);
    assert!(harness.screen_row(1).contains("~/projects"));
    assert!(harness.screen_row(12).starts_with('╰'));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().overlay_scroll(), 0);
}

#[test]
fn test_cancel_key_needs_active_subscription() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.app_mut().deactivate();
    harness.app_mut().toggle_expand(CardId::Projects);
    harness.render().unwrap();

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().state().expanded(), Some(CardId::Projects));

    harness.app_mut().activate();
    harness.app_mut().activate();
    assert_eq!(harness.app().listeners().len(), 1);
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.app().state().expanded(), None);
}
