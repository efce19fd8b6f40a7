//! Email and phone checks, phone formatting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
    // Brazilian display format: (DD) NNNN-NNNN or (DD) NNNNN-NNNN
    static ref PHONE_RE: Regex = Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").expect("valid phone pattern");
}

/// Permissive `local@domain.tld` check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a phone in `(DD) NNNN-NNNN` / `(DD) NNNNN-NNNN` display form.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Format a phone number for display.
///
/// Non-digits are stripped first. Eleven digits format as a mobile number,
/// ten as a landline; anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}
