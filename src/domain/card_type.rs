use serde::Serialize;
use std::fmt;

/// Card brand inferred from the leading digits of a card number.
///
/// Every brand carries the rules the checkout form needs: how many digits a
/// complete number has, how the digits are grouped for display and how long
/// the security code is. `Unknown` has no grouping and is never a valid card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    #[default]
    Unknown,
    Amex,
    Visa,
    MasterCard,
    Discover,
}

/// A leading-digit rule: the first `width` digits, read as a number, must fall
/// within `lo..=hi`.
struct PrefixRule {
    lo: u32,
    hi: u32,
    width: usize,
    card: CardType,
}

const fn rule(lo: u32, hi: u32, width: usize, card: CardType) -> PrefixRule {
    PrefixRule {
        lo,
        hi,
        width,
        card,
    }
}

const PREFIX_RULES: &[PrefixRule] = &[
    rule(34, 34, 2, CardType::Amex),
    rule(37, 37, 2, CardType::Amex),
    rule(4, 4, 1, CardType::Visa),
    rule(51, 55, 2, CardType::MasterCard),
    rule(2221, 2720, 4, CardType::MasterCard),
    rule(6011, 6011, 4, CardType::Discover),
    rule(644, 649, 3, CardType::Discover),
    rule(65, 65, 2, CardType::Discover),
];

impl PrefixRule {
    fn matches(&self, digits: &str) -> bool {
        digits
            .get(..self.width)
            .and_then(|prefix| prefix.parse::<u32>().ok())
            .is_some_and(|value| (self.lo..=self.hi).contains(&value))
    }
}

impl CardType {
    /// Classifies a digit-only string.
    ///
    /// The widest matching prefix rule decides the brand; anything else,
    /// including empty or partially typed prefixes, is `Unknown`.
    pub fn from_digits(digits: &str) -> Self {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CardType::Unknown;
        }

        PREFIX_RULES
            .iter()
            .filter(|rule| rule.matches(digits))
            .max_by_key(|rule| rule.width)
            .map_or(CardType::Unknown, |rule| rule.card)
    }

    pub fn is_known(self) -> bool {
        self != CardType::Unknown
    }

    /// Digits in a complete card number of this brand.
    pub fn expected_digits(self) -> usize {
        match self {
            CardType::Amex => 15,
            _ => 16,
        }
    }

    /// Digits in the security code printed on this brand.
    pub fn cvv_digits(self) -> usize {
        match self {
            CardType::Amex => 4,
            _ => 3,
        }
    }

    /// Group sizes used to display the card number, empty for `Unknown`.
    pub fn grouping(self) -> &'static [usize] {
        match self {
            CardType::Unknown => &[],
            CardType::Amex => &[4, 6, 5],
            CardType::Visa | CardType::MasterCard | CardType::Discover => &[4, 4, 4, 4],
        }
    }

    /// Asset name of the brand logo shown next to the card number.
    pub fn image_key(self) -> &'static str {
        match self {
            CardType::Unknown => "card_unknown",
            CardType::Amex => "card_amex",
            CardType::Visa => "card_visa",
            CardType::MasterCard => "card_mastercard",
            CardType::Discover => "card_discover",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CardType::Unknown => "Unknown",
            CardType::Amex => "American Express",
            CardType::Visa => "Visa",
            CardType::MasterCard => "MasterCard",
            CardType::Discover => "Discover",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_prefixes() {
        assert_eq!(CardType::from_digits("4111111111111111"), CardType::Visa);
        assert_eq!(CardType::from_digits("4"), CardType::Visa);
        assert_eq!(CardType::from_digits("378282246310005"), CardType::Amex);
        assert_eq!(CardType::from_digits("34"), CardType::Amex);
        assert_eq!(CardType::from_digits("5500000000000004"), CardType::MasterCard);
        assert_eq!(CardType::from_digits("2221000000000009"), CardType::MasterCard);
        assert_eq!(CardType::from_digits("6011111111111117"), CardType::Discover);
        assert_eq!(CardType::from_digits("6445"), CardType::Discover);
        assert_eq!(CardType::from_digits("65"), CardType::Discover);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(CardType::from_digits(""), CardType::Unknown);
        assert_eq!(CardType::from_digits("3"), CardType::Unknown);
        assert_eq!(CardType::from_digits("5"), CardType::Unknown);
        assert_eq!(CardType::from_digits("601"), CardType::Unknown);
        assert_eq!(CardType::from_digits("56"), CardType::Unknown);
        assert_eq!(CardType::from_digits("2720"), CardType::MasterCard);
        assert_eq!(CardType::from_digits("2721"), CardType::Unknown);
        assert_eq!(CardType::from_digits("9111111111111111"), CardType::Unknown);
        assert_eq!(CardType::from_digits("4a11"), CardType::Unknown);
    }

    #[test]
    fn test_brand_rules() {
        assert_eq!(CardType::Amex.expected_digits(), 15);
        assert_eq!(CardType::Amex.cvv_digits(), 4);
        assert_eq!(CardType::Amex.grouping().iter().sum::<usize>(), 15);
        assert_eq!(CardType::Visa.grouping().iter().sum::<usize>(), 16);
        assert!(CardType::Unknown.grouping().is_empty());
        assert!(!CardType::Unknown.is_known());
    }

    #[test]
    fn test_card_type_serialization() {
        let json = serde_json::to_string(&CardType::MasterCard).unwrap();
        assert_eq!(json, "\"master_card\"");
    }
}
