use super::expiration::YearMonth;
use super::field::Field;

/// Moves keyboard focus between the form's inputs.
pub trait FocusControl: Send {
    fn move_focus(&mut self, to: Field);
    fn release_focus(&mut self, from: Field);
}

/// Source of the current calendar month for expiration checks.
pub trait Clock: Send + Sync {
    fn current_month(&self) -> YearMonth;
}

pub type FocusControlBox = Box<dyn FocusControl>;
pub type ClockBox = Box<dyn Clock>;
