use cardform::application::pipeline::{FormEvent, ValidationPipeline};
use cardform::application::session::{CheckoutOutcome, CheckoutSession, TextChange};
use cardform::config::ThrottleConfig;
use cardform::domain::card_type::CardType;
use cardform::domain::expiration::YearMonth;
use cardform::domain::field::{Field, FocusChange};
use cardform::infrastructure::clock::FixedClock;
use cardform::infrastructure::focus::RecordingFocus;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

fn pipeline(focus: &RecordingFocus) -> ValidationPipeline {
    ValidationPipeline::new(
        Box::new(focus.clone()),
        Box::new(FixedClock(YearMonth::new(2026, 10).unwrap())),
    )
}

async fn type_out(tx: &mpsc::UnboundedSender<TextChange>, field: Field, text: &str) {
    for end in 1..=text.len() {
        tx.send(TextChange::new(field, &text[..end])).unwrap();
        sleep(Duration::from_millis(20)).await;
    }
    sleep(Duration::from_millis(300)).await;
}

#[tokio::test(start_paused = true)]
async fn test_full_checkout_session() {
    let focus = RecordingFocus::focused_on(Field::CardNumber);
    let mut pipeline = pipeline(&focus);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    pipeline.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let (session, tx) = CheckoutSession::new(pipeline, &ThrottleConfig::default());
    let handle = tokio::spawn(session.run());

    type_out(&tx, Field::CardNumber, "4111111111111111").await;
    type_out(&tx, Field::Expiration, "012999").await;
    type_out(&tx, Field::Cvv, "123").await;
    drop(tx);

    let outcome = handle.await.unwrap();
    assert_eq!(
        outcome,
        CheckoutOutcome {
            card_type: CardType::Visa,
            purchase_enabled: true,
        }
    );
    assert_eq!(
        focus.changes(),
        vec![
            FocusChange::MoveTo(Field::Expiration),
            FocusChange::MoveTo(Field::Cvv),
            FocusChange::Release(Field::Cvv),
        ]
    );

    let events = events.lock().unwrap();
    // Only the settled value of each field is validated
    let validated: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, FormEvent::ValidityChanged { .. }))
        .collect();
    assert_eq!(validated.len(), 3);
    assert!(events.contains(&FormEvent::TextFormatted {
        field: Field::CardNumber,
        text: "4111 1111 1111 1111".to_string(),
    }));
    assert_eq!(events.last(), Some(&FormEvent::PurchaseEnabled(true)));
}

#[tokio::test(start_paused = true)]
async fn test_unthrottled_cvv_validates_every_keystroke() {
    let focus = RecordingFocus::new();
    let config = ThrottleConfig {
        throttle_cvv: false,
        ..ThrottleConfig::default()
    };
    let (session, tx) = CheckoutSession::new(pipeline(&focus), &config);
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(session.with_reports(report_tx).run());

    for text in ["1", "12", "123"] {
        tx.send(TextChange::new(Field::Cvv, text)).unwrap();
    }
    drop(tx);
    handle.await.unwrap();

    let mut displays = Vec::new();
    while let Some(report) = report_rx.recv().await {
        displays.push(report.display);
    }
    assert_eq!(displays, vec!["1", "12", "123"]);
}

#[tokio::test(start_paused = true)]
async fn test_validation_waits_for_quiet_period() {
    let focus = RecordingFocus::new();
    let (session, tx) = CheckoutSession::new(pipeline(&focus), &ThrottleConfig::default());
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(session.with_reports(report_tx).run());

    let start = Instant::now();
    tx.send(TextChange::new(Field::Expiration, "0129")).unwrap();
    let report = report_rx.recv().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(report.display, "01/29");
    assert!(!report.valid);

    drop(tx);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_missing_text_counts_as_empty() {
    let focus = RecordingFocus::new();
    let (session, tx) = CheckoutSession::new(pipeline(&focus), &ThrottleConfig::default());
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(session.with_reports(report_tx).run());

    tx.send(TextChange {
        field: Field::CardNumber,
        text: None,
    })
    .unwrap();
    drop(tx);
    let outcome = handle.await.unwrap();

    let report = report_rx.recv().await.unwrap();
    assert_eq!(report.display, "");
    assert!(!report.valid);
    assert!(!outcome.purchase_enabled);
}
