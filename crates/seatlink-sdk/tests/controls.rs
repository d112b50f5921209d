mod common;

use std::time::Duration;

use common::{FakeGateway, Failure};
use seatlink_sdk::{AutoCheckinToggle, CheckinButton, CheckinReport, FeedbackKind, ToggleState};

#[tokio::test]
async fn successful_enable_turns_on() {
    let fake = FakeGateway::new();
    let toggle = AutoCheckinToggle::new(ToggleState::Off);

    let outcome = toggle.press(&*fake).await.unwrap();
    assert_eq!(toggle.state(), ToggleState::On);
    assert_eq!(outcome.feedback.kind, FeedbackKind::Success);
    assert_eq!(outcome.feedback.lifetime, Duration::from_secs(2));
    assert!(outcome.refresh_status);
    assert_eq!(fake.calls("enable"), 1);
    assert!(!toggle.is_busy());
}

#[tokio::test]
async fn successful_disable_turns_off() {
    let fake = FakeGateway::new();
    let toggle = AutoCheckinToggle::new(ToggleState::On);

    let outcome = toggle.press(&*fake).await.unwrap();
    assert_eq!(toggle.state(), ToggleState::Off);
    assert!(outcome.feedback.is_success());
    assert_eq!(fake.calls("disable"), 1);
    assert_eq!(fake.calls("enable"), 0);
}

#[tokio::test]
async fn failed_enable_stays_off_and_unlocks() {
    let fake = FakeGateway::new();
    fake.fail("enable", Failure::Status(400, Some("请先配置")));
    let toggle = AutoCheckinToggle::new(ToggleState::Off);

    let outcome = toggle.press(&*fake).await.unwrap();
    assert_eq!(toggle.state(), ToggleState::Off);
    assert_eq!(outcome.feedback.kind, FeedbackKind::Error);
    assert!(outcome.feedback.text.contains("请先配置"));
    assert!(!outcome.session_expired);
    assert!(!toggle.is_busy());

    // Not locked: the next press reaches the server again.
    fake.succeed("enable");
    toggle.press(&*fake).await.unwrap();
    assert_eq!(toggle.state(), ToggleState::On);
    assert_eq!(fake.calls("enable"), 2);
}

#[tokio::test]
async fn toggle_is_busy_for_the_whole_request() {
    let fake = FakeGateway::new();
    let gate = fake.hold("enable");
    let toggle = AutoCheckinToggle::new(ToggleState::Off);

    let first = toggle.press(&*fake);
    let second = async {
        tokio::task::yield_now().await;
        assert!(toggle.is_busy());
        let rejected = toggle.press(&*fake).await;
        gate.notify_one();
        rejected
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(fake.calls("enable"), 1);
    assert_eq!(toggle.state(), ToggleState::On);
    assert!(!toggle.is_busy());
}

#[tokio::test]
async fn rejected_credential_is_reported() {
    let fake = FakeGateway::new();
    fake.fail("disable", Failure::Unauthorized);
    let toggle = AutoCheckinToggle::new(ToggleState::On);

    let outcome = toggle.press(&*fake).await.unwrap();
    assert!(outcome.session_expired);
    assert_eq!(toggle.state(), ToggleState::On);
}

#[tokio::test]
async fn checkin_button_reports_server_message() {
    let fake = FakeGateway::new();
    fake.set_checkin_report(CheckinReport {
        success: Some(true),
        message: Some("签到成功".into()),
    });
    let button = CheckinButton::new();
    let toggle = AutoCheckinToggle::new(ToggleState::On);

    let outcome = button.press(&*fake).await.unwrap();
    assert!(outcome.feedback.is_success());
    assert_eq!(outcome.feedback.text, "签到成功");
    assert!(outcome.refresh_status);
    assert_eq!(toggle.state(), ToggleState::On);
    assert_eq!(fake.calls("enable") + fake.calls("disable"), 0);
}

#[tokio::test]
async fn checkin_button_unsuccessful_report_is_an_error() {
    let fake = FakeGateway::new();
    fake.set_checkin_report(CheckinReport {
        success: Some(false),
        message: Some("不在签到时间".into()),
    });
    let button = CheckinButton::new();

    let outcome = button.press(&*fake).await.unwrap();
    assert_eq!(outcome.feedback.kind, FeedbackKind::Error);
    assert_eq!(outcome.feedback.text, "不在签到时间");
    assert!(!button.is_busy());
}

#[tokio::test]
async fn checkin_button_rejects_double_press() {
    let fake = FakeGateway::new();
    let gate = fake.hold("checkin");
    let button = CheckinButton::new();

    let first = button.press(&*fake);
    let second = async {
        let rejected = button.press(&*fake).await;
        gate.notify_one();
        rejected
    };
    let (first, second) = tokio::join!(first, second);
    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(fake.calls("checkin"), 1);
}
