use super::field::Field;

/// Latest validity of each field and the purchase gate derived from them.
///
/// Every field starts out invalid, so the purchase stays disabled until all
/// three have reported a valid value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    validity: [bool; 3],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field's newest validity and returns the combined gate.
    pub fn update(&mut self, field: Field, valid: bool) -> bool {
        self.validity[field.index()] = valid;
        self.purchase_enabled()
    }

    pub fn is_valid(&self, field: Field) -> bool {
        self.validity[field.index()]
    }

    pub fn purchase_enabled(&self) -> bool {
        self.validity.iter().all(|valid| *valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_disabled() {
        let form = FormState::new();
        assert!(!form.purchase_enabled());
        for field in Field::ALL {
            assert!(!form.is_valid(field));
        }
    }

    #[test]
    fn test_enabled_only_when_all_valid() {
        let mut form = FormState::new();
        assert!(!form.update(Field::CardNumber, true));
        assert!(!form.update(Field::Expiration, true));
        assert!(form.update(Field::Cvv, true));
    }

    #[test]
    fn test_regression_disables_immediately() {
        let mut form = FormState::new();
        for field in Field::ALL {
            form.update(field, true);
        }
        assert!(form.purchase_enabled());

        assert!(!form.update(Field::Expiration, false));
        assert!(form.is_valid(Field::CardNumber));
        assert!(form.update(Field::Expiration, true));
    }
}
