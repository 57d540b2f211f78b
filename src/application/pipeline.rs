use crate::domain::card_type::CardType;
use crate::domain::expiration::{EXPIRATION_DIGITS, YearMonth, is_expiration_valid};
use crate::domain::field::{Field, FieldReport, FieldStatus, FocusChange};
use crate::domain::form::FormState;
use crate::domain::format::{
    format_card_number, format_expiration, is_all_digits, strip_card_number, strip_expiration,
};
use crate::domain::luhn::is_luhn_valid;
use crate::domain::ports::{ClockBox, FocusControlBox};
use tracing::{debug, trace};

/// Signals published to observers while edits are processed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The pipeline rewrote a field's text; the view should display `text`.
    TextFormatted { field: Field, text: String },
    /// A field finished validating. Sent once per processed edit.
    ValidityChanged { field: Field, valid: bool },
    CardTypeChanged(CardType),
    /// Combined gate for the purchase action. Sent once per processed edit.
    PurchaseEnabled(bool),
}

pub type Observer = Box<dyn FnMut(&FormEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct FieldState {
    last_raw: Option<String>,
    display: String,
    /// Digit count of the last well-formed edit, `None` after a malformed one.
    last_digits: Option<usize>,
}

/// Result of running one field's rules over its raw text.
struct Evaluation {
    display: String,
    digits: usize,
    target: usize,
    well_formed: bool,
    valid: bool,
}

impl Evaluation {
    fn malformed(raw: &str, target: usize) -> Self {
        Self {
            display: raw.to_string(),
            digits: raw.chars().filter(char::is_ascii_digit).count(),
            target,
            well_formed: false,
            valid: false,
        }
    }

    /// Whether the field holds exactly as many digits as it needs.
    fn complete(&self) -> bool {
        self.well_formed && self.digits == self.target
    }

    fn status(&self, advanced: bool) -> FieldStatus {
        if self.display.is_empty() {
            FieldStatus::Empty
        } else if advanced {
            FieldStatus::AutoAdvanced
        } else if self.valid {
            FieldStatus::Valid
        } else if !self.well_formed || self.digits >= self.target {
            FieldStatus::Invalid
        } else {
            FieldStatus::PartiallyEntered
        }
    }
}

/// Classifies, formats and validates edits to the payment form.
///
/// One pipeline backs one checkout attempt. It owns the current card type,
/// which only card-number edits change and which the CVV rules read. Edits
/// are handled one at a time and each runs to completion. Text the pipeline
/// writes back is published as [`FormEvent::TextFormatted`] and is never fed
/// back in as an edit; formatting is idempotent, so a view that echoes it
/// back anyway settles after one extra pass.
pub struct ValidationPipeline {
    card_type: CardType,
    fields: [FieldState; 3],
    form: FormState,
    focus: FocusControlBox,
    clock: ClockBox,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl ValidationPipeline {
    pub fn new(focus: FocusControlBox, clock: ClockBox) -> Self {
        Self {
            card_type: CardType::Unknown,
            fields: Default::default(),
            form: FormState::new(),
            focus,
            clock,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Drops every observer. Called when the form is dismissed.
    pub fn teardown(&mut self) {
        debug!(observers = self.observers.len(), "tearing down checkout form");
        self.observers.clear();
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn purchase_enabled(&self) -> bool {
        self.form.purchase_enabled()
    }

    pub fn is_valid(&self, field: Field) -> bool {
        self.form.is_valid(field)
    }

    pub fn display_text(&self, field: Field) -> &str {
        &self.fields[field.index()].display
    }

    /// Processes an edit to `field`.
    ///
    /// Returns `None` when the text equals the last text processed for that
    /// field; nothing is recomputed or published in that case. Missing text
    /// is treated as empty.
    pub fn handle_text_change(&mut self, field: Field, raw: Option<&str>) -> Option<FieldReport> {
        let raw = raw.unwrap_or_default();
        if self.fields[field.index()].last_raw.as_deref() == Some(raw) {
            trace!(%field, "unchanged text, skipping");
            return None;
        }

        let previous_card = self.card_type;
        let evaluation = match field {
            Field::CardNumber => evaluate_card_number(raw, &mut self.card_type),
            Field::Expiration => evaluate_expiration(raw, self.clock.current_month()),
            Field::Cvv => evaluate_cvv(raw, self.card_type),
        };

        if self.card_type != previous_card {
            debug!(from = %previous_card, to = %self.card_type, "card type changed");
            self.publish(&FormEvent::CardTypeChanged(self.card_type));
        }
        if evaluation.display != raw {
            self.publish(&FormEvent::TextFormatted {
                field,
                text: evaluation.display.clone(),
            });
        }

        let state = &mut self.fields[field.index()];
        // The target can move with the card type, so compare counts rather
        // than a remembered completeness flag.
        let reached = evaluation.complete() && state.last_digits != Some(evaluation.digits);
        state.last_digits = evaluation.well_formed.then_some(evaluation.digits);
        state.last_raw = Some(raw.to_string());
        state.display.clone_from(&evaluation.display);

        let focus = if reached { self.advance_from(field) } else { None };

        let purchase_enabled = self.form.update(field, evaluation.valid);
        debug!(
            %field,
            valid = evaluation.valid,
            digits = evaluation.digits,
            card_type = %self.card_type,
            purchase_enabled,
            "field validated"
        );
        self.publish(&FormEvent::ValidityChanged {
            field,
            valid: evaluation.valid,
        });
        self.publish(&FormEvent::PurchaseEnabled(purchase_enabled));

        Some(FieldReport {
            field,
            status: evaluation.status(focus.is_some()),
            display: evaluation.display,
            valid: evaluation.valid,
            card_type: self.card_type,
            purchase_enabled,
            focus,
        })
    }

    fn advance_from(&mut self, field: Field) -> Option<FocusChange> {
        let change = match field {
            Field::CardNumber => FocusChange::MoveTo(Field::Expiration),
            Field::Expiration => FocusChange::MoveTo(Field::Cvv),
            Field::Cvv => FocusChange::Release(Field::Cvv),
        };
        match change {
            FocusChange::MoveTo(to) => self.focus.move_focus(to),
            FocusChange::Release(from) => self.focus.release_focus(from),
        }
        debug!(?change, "focus changed");
        Some(change)
    }

    fn publish(&mut self, event: &FormEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }
}

/// Reclassifies the card from the typed digits and regroups them.
fn evaluate_card_number(raw: &str, card_type: &mut CardType) -> Evaluation {
    let digits = strip_card_number(raw);
    if !is_all_digits(&digits) {
        *card_type = CardType::Unknown;
        return Evaluation::malformed(raw, card_type.expected_digits());
    }

    *card_type = CardType::from_digits(&digits);
    let target = card_type.expected_digits();
    let valid = card_type.is_known() && digits.len() == target && is_luhn_valid(&digits);

    Evaluation {
        display: format_card_number(&digits, *card_type),
        digits: digits.len(),
        target,
        well_formed: true,
        valid,
    }
}

fn evaluate_expiration(raw: &str, today: YearMonth) -> Evaluation {
    let digits = strip_expiration(raw);
    if !is_all_digits(&digits) {
        return Evaluation::malformed(raw, EXPIRATION_DIGITS);
    }

    Evaluation {
        display: format_expiration(&digits),
        digits: digits.len(),
        target: EXPIRATION_DIGITS,
        well_formed: true,
        valid: is_expiration_valid(&digits, today),
    }
}

/// The security code is checked as typed; any non-digit fails it outright.
fn evaluate_cvv(raw: &str, card_type: CardType) -> Evaluation {
    let target = card_type.cvv_digits();
    if !is_all_digits(raw) {
        return Evaluation::malformed(raw, target);
    }

    Evaluation {
        display: raw.to_string(),
        digits: raw.len(),
        target,
        well_formed: true,
        valid: raw.len() == target,
    }
}
