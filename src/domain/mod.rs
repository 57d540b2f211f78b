//! Card rules, field formatting and validation, free of timing and I/O.

pub mod card_type;
pub mod expiration;
pub mod field;
pub mod form;
pub mod format;
pub mod luhn;
pub mod ports;
