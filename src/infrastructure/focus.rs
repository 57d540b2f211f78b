use crate::domain::field::{Field, FocusChange};
use crate::domain::ports::FocusControl;
use std::sync::{Arc, Mutex, PoisonError};

/// Focus control that remembers every request instead of driving a UI.
///
/// Clones share the same log, so a caller can keep one handle while the
/// pipeline owns the other. Also tracks which field currently holds focus.
#[derive(Debug, Default, Clone)]
pub struct RecordingFocus {
    inner: Arc<Mutex<FocusLog>>,
}

#[derive(Debug, Default)]
struct FocusLog {
    changes: Vec<FocusChange>,
    focused: Option<Field>,
}

impl RecordingFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `field` focused, as when the payment screen opens.
    pub fn focused_on(field: Field) -> Self {
        let focus = Self::new();
        focus.lock().focused = Some(field);
        focus
    }

    pub fn changes(&self) -> Vec<FocusChange> {
        self.lock().changes.clone()
    }

    pub fn focused(&self) -> Option<Field> {
        self.lock().focused
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FocusLog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FocusControl for RecordingFocus {
    fn move_focus(&mut self, to: Field) {
        let mut log = self.lock();
        log.changes.push(FocusChange::MoveTo(to));
        log.focused = Some(to);
    }

    fn release_focus(&mut self, from: Field) {
        let mut log = self.lock();
        log.changes.push(FocusChange::Release(from));
        if log.focused == Some(from) {
            log.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_focus_shares_log() {
        let handle = RecordingFocus::focused_on(Field::CardNumber);
        let mut owned = handle.clone();

        owned.move_focus(Field::Expiration);
        owned.move_focus(Field::Cvv);
        owned.release_focus(Field::Cvv);

        assert_eq!(
            handle.changes(),
            vec![
                FocusChange::MoveTo(Field::Expiration),
                FocusChange::MoveTo(Field::Cvv),
                FocusChange::Release(Field::Cvv),
            ]
        );
        assert_eq!(handle.focused(), None);
    }

    #[test]
    fn test_release_of_unfocused_field_keeps_focus() {
        let mut focus = RecordingFocus::focused_on(Field::Expiration);
        focus.release_focus(Field::Cvv);
        assert_eq!(focus.focused(), Some(Field::Expiration));
    }
}
