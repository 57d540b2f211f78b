use super::pipeline::ValidationPipeline;
use super::throttle::FieldThrottle;
use crate::config::ThrottleConfig;
use crate::domain::card_type::CardType;
use crate::domain::field::{Field, FieldReport};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

/// A keystroke-level edit delivered by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub field: Field,
    pub text: Option<String>,
}

impl TextChange {
    pub fn new(field: Field, text: impl Into<String>) -> Self {
        Self {
            field,
            text: Some(text.into()),
        }
    }
}

/// State handed to the confirmation screen once the form closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub card_type: CardType,
    pub purchase_enabled: bool,
}

impl CheckoutOutcome {
    pub(crate) fn of(pipeline: &ValidationPipeline) -> Self {
        Self {
            card_type: pipeline.card_type(),
            purchase_enabled: pipeline.purchase_enabled(),
        }
    }
}

/// Drives a [`ValidationPipeline`] from a channel of edits.
///
/// Edits from every field share one queue and are handled in arrival order
/// after passing through the per-field debounce. The session ends when every
/// sender is dropped: pending edits are flushed, observers are torn down and
/// the final outcome is returned.
pub struct CheckoutSession {
    pipeline: ValidationPipeline,
    throttle: FieldThrottle<Instant>,
    changes: mpsc::UnboundedReceiver<TextChange>,
    reports: Option<mpsc::UnboundedSender<FieldReport>>,
}

impl CheckoutSession {
    pub fn new(
        pipeline: ValidationPipeline,
        config: &ThrottleConfig,
    ) -> (Self, mpsc::UnboundedSender<TextChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            pipeline,
            throttle: FieldThrottle::new(config),
            changes: rx,
            reports: None,
        };
        (session, tx)
    }

    /// Forwards a report for every processed edit to `reports`.
    pub fn with_reports(mut self, reports: mpsc::UnboundedSender<FieldReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    pub async fn run(mut self) -> CheckoutOutcome {
        loop {
            let deadline = self.throttle.next_deadline();
            tokio::select! {
                change = self.changes.recv() => {
                    let Some(change) = change else { break };
                    trace!(field = %change.field, "edit received");
                    let text = change.text.unwrap_or_default();
                    if let Some(text) = self.throttle.push(change.field, text, Instant::now()) {
                        self.process(change.field, &text);
                    }
                }
                _ = wait_for(deadline) => {
                    for (_, field, text) in self.throttle.poll_due(Instant::now()) {
                        self.process(field, &text);
                    }
                }
            }
        }

        for (_, field, text) in self.throttle.flush_all() {
            self.process(field, &text);
        }

        let outcome = CheckoutOutcome::of(&self.pipeline);
        debug!(card_type = %outcome.card_type, purchase_enabled = outcome.purchase_enabled, "checkout form closed");
        self.pipeline.teardown();
        outcome
    }

    fn process(&mut self, field: Field, text: &str) {
        let Some(report) = self.pipeline.handle_text_change(field, Some(text)) else {
            return;
        };
        if let Some(reports) = &self.reports
            && reports.send(report).is_err()
        {
            self.reports = None;
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
