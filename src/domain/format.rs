//! Display formatting for the card-number and expiration fields.
//!
//! Both formatters accept already formatted text and strip their own
//! separators first, so running them on their own output is a no-op.

use super::card_type::CardType;

pub const CARD_SEPARATOR: char = ' ';
pub const EXPIRATION_SEPARATOR: char = '/';

/// Removes whitespace typed or inserted into the card-number field.
pub fn strip_card_number(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Removes the slash and any whitespace from the expiration field.
pub fn strip_expiration(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != EXPIRATION_SEPARATOR && !c.is_whitespace())
        .collect()
}

pub fn is_all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Groups card-number digits according to the brand's pattern.
///
/// Digits typed past the end of the pattern form one trailing group. Brands
/// without a pattern get their digits back unchanged.
pub fn format_card_number(raw: &str, card: CardType) -> String {
    let digits = strip_card_number(raw);
    let pattern = card.grouping();
    if pattern.is_empty() || !is_all_digits(&digits) {
        return digits;
    }

    let mut formatted = String::with_capacity(digits.len() + pattern.len());
    let mut rest = digits.as_str();
    for &size in pattern {
        if rest.is_empty() {
            break;
        }
        let (group, tail) = rest.split_at(size.min(rest.len()));
        if !formatted.is_empty() {
            formatted.push(CARD_SEPARATOR);
        }
        formatted.push_str(group);
        rest = tail;
    }
    if !rest.is_empty() {
        formatted.push(CARD_SEPARATOR);
        formatted.push_str(rest);
    }

    formatted
}

/// Inserts the month/year slash once a digit past the month has been typed.
pub fn format_expiration(raw: &str) -> String {
    let digits = strip_expiration(raw);
    if digits.len() <= 2 || !digits.is_char_boundary(2) {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{month}{EXPIRATION_SEPARATOR}{year}")
}
