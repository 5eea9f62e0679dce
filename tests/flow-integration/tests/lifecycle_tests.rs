use std::time::Duration;

use cardpost_common::draft::{load_draft, save_draft};
use cardpost_common::flip::{CardFace, FlipState, ManualScheduler};
use cardpost_common::recipient::RecipientView;
use cardpost_common::storage::{card_key, KvStore, MemoryStore, DRAFT_KEY};
use cardpost_common::template;
use cardpost_common::{CardError, StorageError};
use cardpost_flow_integration::harness::{RecordingNotifier, TestHarness};
use cardpost_flow_integration::{make_draft, make_form, published_count};

/// Every catalog id resolves; ids around the catalog do not.
#[test]
fn catalog_lookup_bounds() {
    for id in 1..=8 {
        assert_eq!(template::lookup(id).unwrap().id, id);
    }
    for id in [0, 9, 100] {
        assert_eq!(template::lookup(id), Err(CardError::TemplateNotFound(id)));
    }
}

#[test]
fn draft_round_trips_through_store() {
    let mut store = MemoryStore::new();
    assert_eq!(load_draft(&store), None);

    let draft = make_draft(3, "Sam", "Alex");
    save_draft(&mut store, &draft).unwrap();
    assert_eq!(load_draft(&store), Some(draft.clone()));
    // Reading twice changes nothing.
    assert_eq!(load_draft(&store), Some(draft));
}

#[test]
fn corrupted_draft_reads_as_absent() {
    let mut store = MemoryStore::new();
    store.set_item(DRAFT_KEY, "{not json").unwrap();
    assert_eq!(load_draft(&store), None);
}

/// Closed -> Opening -> Open, clicks while opening are dropped, and a second
/// click brings the card back to Closed.
#[test]
fn flip_card_full_cycle() {
    let h = TestHarness::setup();
    let mut card = h.alex.session.flip_card();
    let mut timers = ManualScheduler::new();
    assert_eq!(card.state(), FlipState::Closed);
    assert_eq!(card.state().face(), CardFace::Front);

    assert!(card.click_with(&mut timers));
    assert_eq!(card.state(), FlipState::Opening);
    assert!(!card.click_with(&mut timers));
    assert_eq!(timers.pending(), 1);

    timers.advance_card(&mut card, Duration::from_millis(299));
    assert_eq!(card.state(), FlipState::Opening);
    timers.advance_card(&mut card, Duration::from_millis(1));
    assert_eq!(card.state(), FlipState::Open);
    assert_eq!(card.state().face(), CardFace::Message);

    assert!(card.click_with(&mut timers));
    timers.advance_card(&mut card, Duration::from_millis(300));
    assert_eq!(card.state(), FlipState::Closed);
}

#[tokio::test]
async fn sent_card_resolves_to_draft_snapshot() {
    let mut h = TestHarness::setup();
    let draft = h.alex.customize(2, "Sam", "Many happy returns");
    let notifier = RecordingNotifier::default();

    let outcome = h.alex.send_email("a@b.com", &notifier).await.unwrap();
    let card_id = outcome.record.card_id.clone();
    assert!(!card_id.as_str().is_empty());
    assert_eq!(outcome.record.draft_snapshot, draft);

    let recipient = h.recipient_session();
    match recipient.open_card(card_id.as_str()) {
        RecipientView::Ready { card, template } => {
            assert_eq!(card.draft, draft);
            assert_eq!(template.name, "Cake & Candles");
        }
        other => panic!("expected the sent card, got {other:?}"),
    }
}

#[tokio::test]
async fn immediate_sends_get_distinct_ids() {
    let mut h = TestHarness::setup();
    h.alex.customize(1, "Sam", "One");
    let notifier = RecordingNotifier::default();

    let first = h.alex.send_email("a@b.com", &notifier).await.unwrap();
    let second = h.alex.send_email("a@b.com", &notifier).await.unwrap();
    assert_ne!(first.record.card_id, second.record.card_id);

    let store = h.recipient_session().finish();
    assert_eq!(published_count(&store), 2);
    // The confirmation only knows about the latest send.
    assert_eq!(
        h.alex.session.confirmation().unwrap().record.card_id,
        second.record.card_id
    );
}

#[test]
fn unknown_card_link_renders_not_found() {
    let h = TestHarness::setup();
    let recipient = h.recipient_session();
    assert_eq!(recipient.open_card("nonexistent-id"), RecipientView::NotFound);
}

#[tokio::test]
async fn send_without_draft_fails_and_writes_nothing() {
    let mut h = TestHarness::setup();
    let notifier = RecordingNotifier::default();
    let err = h.alex.send_email("a@b.com", &notifier).await.unwrap_err();
    assert_eq!(err, CardError::DraftMissing);
    assert!(h.alex.session.store().is_empty());
    assert!(notifier.sent().is_empty());
    assert!(h.alex.session.confirmation().is_none());
}

/// A draft pointing at a template that is not in the catalog cannot be
/// previewed or sent.
#[tokio::test]
async fn draft_with_unknown_template_is_rejected() {
    let mut store = MemoryStore::new();
    save_draft(&mut store, &make_draft(42, "Sam", "Alex")).unwrap();
    let mut h = TestHarness::with_store(store, Default::default());

    assert!(h.alex.session.preview(1).unwrap_err().is_not_found());
    let err = h
        .alex
        .send_email("a@b.com", &RecordingNotifier::default())
        .await
        .unwrap_err();
    assert_eq!(err, CardError::TemplateNotFound(42));
}

#[tokio::test]
async fn customize_preview_send_confirm() {
    let mut h = TestHarness::setup();

    let (template, form) = h.alex.session.customization(7).unwrap();
    assert_eq!(template.emoji, "🌊");
    assert_eq!(form.recipient_name, "");

    h.alex.customize(7, "Sam", "Surf's up");
    let preview = h.alex.session.preview(7).unwrap();
    assert_eq!(preview.draft.message, "Surf's up");
    assert_eq!(preview.template.id, 7);

    // Coming back to the same template pre-fills the form.
    let (_, form) = h.alex.session.customization(7).unwrap();
    assert_eq!(form.custom_message, "Surf's up");

    let outcome = h.alex.send_phone("+1 555 0100").await.unwrap();
    let confirmation = h.alex.session.confirmation().unwrap();
    assert_eq!(confirmation.delivery_method, "SMS");
    assert_eq!(confirmation.delivery_address, "+1 555 0100");
    assert_eq!(
        confirmation.card_url,
        format!("https://cards.test/card/{}", outcome.record.card_id)
    );
}

#[tokio::test]
async fn stored_records_use_browser_wire_names() {
    let mut h = TestHarness::setup();
    h.alex.customize(4, "Sam", "Unwrap me");
    let outcome = h
        .alex
        .send_email("sam@example.com", &RecordingNotifier::default())
        .await
        .unwrap();

    let store = h.alex.session.store();
    let raw = store
        .get_item(&card_key(outcome.record.card_id.as_str()))
        .unwrap()
        .unwrap();
    let card: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(card["cardId"], 4);
    assert_eq!(card["recipientName"], "Sam");
    assert_eq!(card["senderName"], "Alex");
    assert_eq!(card["useAI"], false);
}

/// The send screen has nothing to show until a card was customized, and then
/// shows the stored draft's design regardless of the route.
#[test]
fn order_summary_needs_a_draft() {
    let mut h = TestHarness::setup();
    assert_eq!(h.alex.session.order_summary(), Err(CardError::DraftMissing));

    h.alex.customize(3, "Sam", "Hats on");
    let summary = h.alex.session.order_summary().unwrap();
    assert_eq!(summary.template.name, "Party Hat");
    assert_eq!(summary.draft.sender_name, "Alex");
    assert_eq!(summary.total_cents(), 100);
}

#[test]
fn full_storage_surfaces_error_and_keeps_draft() {
    let mut h = TestHarness::with_store(MemoryStore::with_quota(256), Default::default());
    let first = h.alex.customize(2, "Sam", "Short");

    let long = make_form("Sam", "Alex", &"x".repeat(1024));
    let err = h.alex.session.save_customization(2, long).unwrap_err();
    assert!(matches!(err, CardError::Storage(StorageError::QuotaExceeded { .. })));
    assert_eq!(h.alex.session.current_draft(), Some(first));
}
