use super::pipeline::ValidationPipeline;
use super::session::CheckoutOutcome;
use super::throttle::FieldThrottle;
use crate::config::ThrottleConfig;
use crate::domain::field::{Field, FieldReport};
use std::time::Duration;
use tracing::warn;

/// Whole milliseconds in `offset`, saturating at `u64::MAX`.
pub fn as_millis(offset: Duration) -> u64 {
    u64::try_from(offset.as_millis()).unwrap_or(u64::MAX)
}

/// An edit stamped with its offset from the start of a recorded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedChange {
    pub at: Duration,
    pub field: Field,
    pub text: String,
}

/// A report together with the virtual time it was produced at.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedReport {
    pub at: Duration,
    pub report: FieldReport,
}

/// Replays recorded edits through the pipeline in virtual time.
///
/// Uses the same debounce as the live session but never sleeps, so a
/// recording always produces the same reports.
pub struct ScriptReplay {
    pipeline: ValidationPipeline,
    throttle: FieldThrottle<Duration>,
    now: Duration,
}

impl ScriptReplay {
    pub fn new(pipeline: ValidationPipeline, config: &ThrottleConfig) -> Self {
        Self {
            pipeline,
            throttle: FieldThrottle::new(config),
            now: Duration::ZERO,
        }
    }

    /// Advances the clock to the edit's timestamp and applies it.
    ///
    /// Edits stamped earlier than one already seen are treated as arriving
    /// at the current time.
    pub fn feed(&mut self, change: ScriptedChange) -> Vec<TimedReport> {
        if change.at < self.now {
            warn!(
                at_ms = as_millis(change.at),
                now_ms = as_millis(self.now),
                "edit out of order, applying at current time"
            );
        }
        self.now = self.now.max(change.at);

        let mut reports = self.process_due();
        if let Some(text) = self.throttle.push(change.field, change.text, self.now) {
            reports.extend(self.process(self.now, change.field, &text));
        }
        reports
    }

    /// Flushes pending edits, tears the form down and returns the outcome.
    pub fn finish(mut self) -> (Vec<TimedReport>, CheckoutOutcome) {
        let mut reports = Vec::new();
        for (at, field, text) in self.throttle.flush_all() {
            reports.extend(self.process(at, field, &text));
        }
        let outcome = CheckoutOutcome::of(&self.pipeline);
        self.pipeline.teardown();
        (reports, outcome)
    }

    fn process_due(&mut self) -> Vec<TimedReport> {
        let mut reports = Vec::new();
        for (at, field, text) in self.throttle.poll_due(self.now) {
            reports.extend(self.process(at, field, &text));
        }
        reports
    }

    fn process(&mut self, at: Duration, field: Field, text: &str) -> Option<TimedReport> {
        self.pipeline
            .handle_text_change(field, Some(text))
            .map(|report| TimedReport { at, report })
    }
}
