use std::time::Duration;

use cardpost_common::notification::NotificationStatus;
use cardpost_common::recipient::RecipientView;
use cardpost_common::{AppConfig, NotificationError};
use cardpost_flow_integration::harness::{
    RecordingNotifier, RejectingNotifier, SlowNotifier, TestHarness,
};

#[tokio::test]
async fn email_send_notifies_with_card_link() {
    let mut h = TestHarness::setup();
    h.alex.customize(6, "Sam", "Bloom on");
    let notifier = RecordingNotifier::default();

    let outcome = h.alex.send_email("sam@example.com", &notifier).await.unwrap();
    assert_eq!(outcome.notification, NotificationStatus::Sent);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to_email, "sam@example.com");
    assert_eq!(email.to_name, "Sam");
    assert_eq!(email.from_name, "Alex");
    assert_eq!(email.message, "Bloom on");
    assert_eq!(email.card_emoji, "🌸");
    assert_eq!(email.subject, "Happy Birthday Sam! 🎉");
    assert_eq!(
        email.card_url,
        format!("https://cards.test/card/{}", outcome.record.card_id)
    );
}

#[tokio::test]
async fn rejected_notification_keeps_card_published() {
    let mut h = TestHarness::setup();
    h.alex.customize(3, "Sam", "Party time");

    let outcome = h.alex.send_email("sam@example.com", &RejectingNotifier).await.unwrap();
    assert!(matches!(
        outcome.notification,
        NotificationStatus::Failed(NotificationError::Rejected(_))
    ));
    assert!(outcome.notification.warning().is_some());

    assert!(h.alex.session.confirmation().is_some());
    let view = h.recipient_session().open_card(outcome.record.card_id.as_str());
    assert!(matches!(view, RecipientView::Ready { .. }));
}

#[tokio::test]
async fn slow_notification_times_out_without_undoing_publish() {
    let mut h = TestHarness::with_config(AppConfig {
        notification_timeout_ms: 20,
        ..AppConfig::default()
    });
    h.alex.customize(8, "Sam", "Golden hour");
    let notifier = SlowNotifier {
        delay: Duration::from_secs(5),
    };

    let outcome = h.alex.send_email("sam@example.com", &notifier).await.unwrap();
    assert_eq!(
        outcome.notification,
        NotificationStatus::Failed(NotificationError::TimedOut(20))
    );
    let view = h.recipient_session().open_card(outcome.record.card_id.as_str());
    assert!(matches!(view, RecipientView::Ready { .. }));
}

#[tokio::test]
async fn phone_delivery_sends_nothing() {
    let mut h = TestHarness::setup();
    h.alex.customize(5, "Sam", "Shine");
    let outcome = h.alex.send_phone("555 0100").await.unwrap();
    assert_eq!(outcome.notification, NotificationStatus::NotRequested);
    assert_eq!(outcome.record.recipient_email, "");
}
