// End-to-end tests for mouse interaction with the window controls

use crate::common::harness::PortfolioTestHarness;
use termfolio::card::CardId;
use termfolio::config::Config;

#[test]
fn test_click_minimize_dot_collapses_card() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    let (_, row) = harness.find_text("~/whoami").unwrap();

    harness.mouse_click(4, row).unwrap();
    assert!(harness.app().state().is_minimized(CardId::Whoami));
    assert_eq!(
        harness.app().page_layout().slot(CardId::Whoami).unwrap().height,
        3
    );

    harness.mouse_click(4, row).unwrap();
    assert!(!harness.app().state().is_minimized(CardId::Whoami));
}

#[test]
fn test_expand_dot_opens_and_closes_overlay() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    let (_, row) = harness.find_text("~/education").unwrap();

    harness.mouse_click(6, row).unwrap();
    assert_eq!(harness.app().state().expanded(), Some(CardId::Education));

    // Minimize dot is disabled in the overlay
    harness.mouse_click(4, 1).unwrap();
    assert!(!harness.app().state().is_minimized(CardId::Education));

    harness.mouse_click(6, 1).unwrap();
    assert_eq!(harness.app().state().expanded(), None);
}

#[test]
fn test_wheel_scrolls_page() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.mouse_scroll_down(10, 10).unwrap();
    assert_eq!(harness.app().scroll(), 3);
    harness.mouse_scroll_up(10, 10).unwrap();
    harness.mouse_scroll_up(10, 10).unwrap();
    assert_eq!(harness.app().scroll(), 0);
}

#[test]
fn test_click_on_card_body_focuses_it() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    let (_, row) = harness.find_text("~/education").unwrap();
    harness.mouse_click(30, row + 2).unwrap();
    assert_eq!(harness.app().focus(), Some(CardId::Education));
}

#[test]
fn test_keybinding_override_from_config() {
    let config: Config = serde_json::from_str(
        r#"{ "keybindings": [ { "key": "x", "action": "toggle_pin" } ] }"#,
    )
    .unwrap();
    let mut harness = PortfolioTestHarness::with_config(80, 30, config).unwrap();
    harness
        .send_key(crossterm::event::KeyCode::Tab, crossterm::event::KeyModifiers::NONE)
        .unwrap();
    harness.press('x').unwrap();
    assert!(harness.app().state().is_pinned(CardId::Whoami));
}
