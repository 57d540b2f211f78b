/// Runs the Luhn checksum over a digit-only string.
///
/// Callers strip separators and reject non-digit input before calling this;
/// debug builds assert that contract. Empty input is never valid.
pub fn is_luhn_valid(digits: &str) -> bool {
    debug_assert!(
        digits.bytes().all(|b| b.is_ascii_digit()),
        "luhn check called with non-digit input: {digits:?}"
    );

    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (i, byte) in digits.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }
        let mut digit = u32::from(byte - b'0');
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}
