use super::card_type::CardType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three inputs of the payment form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardNumber,
    Expiration,
    Cvv,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::CardNumber, Field::Expiration, Field::Cvv];

    pub(crate) fn index(self) -> usize {
        match self {
            Field::CardNumber => 0,
            Field::Expiration => 1,
            Field::Cvv => 2,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::CardNumber => "card_number",
            Field::Expiration => "expiration",
            Field::Cvv => "cvv",
        })
    }
}

/// Observable state of a field after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Empty,
    PartiallyEntered,
    AutoAdvanced,
    Valid,
    Invalid,
}

/// Focus change requested while handling an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "field", rename_all = "snake_case")]
pub enum FocusChange {
    MoveTo(Field),
    Release(Field),
}

/// Everything one processed edit produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub field: Field,
    pub display: String,
    pub valid: bool,
    pub status: FieldStatus,
    pub card_type: CardType,
    pub purchase_enabled: bool,
    pub focus: Option<FocusChange>,
}
