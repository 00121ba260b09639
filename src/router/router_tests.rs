// Tests for screen router transitions

use super::*;

fn record() -> CompletionRecord {
    CompletionRecord::synthesize(chrono::Utc::now(), 40)
}

#[test]
fn test_router_starts_home() {
    let router = ScreenRouter::new();
    assert_eq!(router.screen(), &Screen::Home);
    assert!(router.record().is_none());
}

#[test]
fn test_full_cycle() {
    let mut router = ScreenRouter::new();
    let rec = record();

    router.start().unwrap();
    assert_eq!(router.screen(), &Screen::Progress);
    assert!(router.record().is_none());

    router.on_completed(rec.clone()).unwrap();
    assert_eq!(router.record(), Some(&rec));

    router.reset().unwrap();
    assert_eq!(router.screen(), &Screen::Home);
    assert!(router.record().is_none());
}

#[test]
fn test_start_from_certificate_discards_record() {
    let mut router = ScreenRouter::new();
    router.start().unwrap();
    router.on_completed(record()).unwrap();

    router.start().unwrap();
    assert_eq!(router.screen(), &Screen::Progress);
    assert!(router.record().is_none());
}

#[test]
fn test_reset_from_home_rejected() {
    let mut router = ScreenRouter::new();

    let err = router.reset().unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidTransition {
            action: "reset",
            screen: "home"
        }
    ));
    assert_eq!(router.screen(), &Screen::Home);
}

#[test]
fn test_reset_from_progress_rejected() {
    let mut router = ScreenRouter::new();
    router.start().unwrap();

    assert!(router.reset().is_err());
    assert_eq!(router.screen(), &Screen::Progress);
}

#[test]
fn test_start_while_in_progress_rejected() {
    let mut router = ScreenRouter::new();
    router.start().unwrap();

    assert!(router.start().is_err());
    assert_eq!(router.screen(), &Screen::Progress);
}

#[test]
fn test_completion_outside_progress_rejected() {
    let mut router = ScreenRouter::new();
    assert!(router.on_completed(record()).is_err());
    assert_eq!(router.screen(), &Screen::Home);

    router.start().unwrap();
    let first = record();
    router.on_completed(first.clone()).unwrap();

    // A second completion must not replace the stored record
    assert!(router.on_completed(record()).is_err());
    assert_eq!(router.record(), Some(&first));
}

#[test]
fn test_transition_error_message() {
    let mut router = ScreenRouter::new();
    let err = router.reset().unwrap_err();
    assert_eq!(err.to_string(), "Cannot reset while on the home screen");
}
