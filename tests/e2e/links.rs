// End-to-end tests for link selection, outbound links and the resume download

use crate::common::harness::PortfolioTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use termfolio::card::CardId;
use termfolio::config::DEFAULT_RESUME_FILE_NAME;
use termfolio::content::Portfolio;

fn focus(harness: &mut PortfolioTestHarness, card: CardId) {
    while harness.app().focus() != Some(card) {
        harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    }
}

#[test]
fn test_open_project_link_with_keyboard() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Projects);

    harness.press(']').unwrap();
    harness.press(']').unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let expected = Portfolio::default().projects[1].link.clone();
    assert_eq!(harness.opened_links(), vec![expected.clone()]);
    harness.assert_screen_contains(&format!("opened {}", expected));
}

#[test]
fn test_email_opens_as_mailto() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    focus(&mut harness, CardId::Contact);
    harness.press(']').unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let email = Portfolio::default().contact.email;
    assert_eq!(harness.opened_links(), vec![format!("mailto:{}", email)]);
}

#[test]
fn test_selected_link_is_scrolled_into_view() {
    let mut harness = PortfolioTestHarness::new(80, 20).unwrap();
    focus(&mut harness, CardId::Contact);
    harness.press('[').unwrap();

    let layout = harness.app().page_layout();
    let slot = layout.slot(CardId::Contact).unwrap();
    let last = slot.links.len() - 1;
    let row = slot.link_row(last).unwrap();
    let scroll = harness.app().scroll();
    assert_eq!(harness.app().selected_link(), Some(last));
    assert!(row >= scroll && row < scroll + layout.viewport.height);
}

#[test]
fn test_resume_download_saves_under_suggested_name() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.install_resume(b"%PDF-1.4 resume").unwrap();

    focus(&mut harness, CardId::Contact);
    harness.press(']').unwrap();
    harness.press(']').unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let saved = harness
        .dir_context()
        .download_dir
        .join(DEFAULT_RESUME_FILE_NAME);
    assert_eq!(std::fs::read(&saved).unwrap(), b"%PDF-1.4 resume");
    assert!(harness.opened_links().is_empty());
    harness.assert_screen_contains("resume saved to");

    // A second download keeps the first copy
    harness.press('d').unwrap();
    let numbered = harness
        .dir_context()
        .download_dir
        .join("Nisanth_Nimashakavi_Resume (1).pdf");
    assert!(numbered.exists());
    assert!(saved.exists());
}

#[test]
fn test_missing_resume_is_reported_not_fatal() {
    let mut harness = PortfolioTestHarness::new(80, 30).unwrap();
    harness.press('d').unwrap();
    harness.assert_screen_contains("download failed");
    assert!(!harness.app().should_quit());

    // The message clears on the next key press
    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    harness.assert_screen_not_contains("download failed");
}

#[test]
fn test_click_on_link_row_opens_it() {
    // Tall enough for the whole page
    let mut harness = PortfolioTestHarness::new(80, 140).unwrap();
    let layout = harness.app().page_layout().clone();
    let slot = layout.slot(CardId::Projects).unwrap();
    let row = layout.viewport.y + slot.link_row(2).unwrap();

    harness.mouse_click(10, row).unwrap();

    let expected = Portfolio::default().projects[2].link.clone();
    assert_eq!(harness.opened_links(), vec![expected]);
    assert_eq!(harness.app().focus(), Some(CardId::Projects));
    assert_eq!(harness.app().selected_link(), Some(2));
}
