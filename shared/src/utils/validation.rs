//! Contact format validation.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("valid phone regex"));

/// Check that a string looks like a deliverable email address
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// Check that a string is an E.164 phone number
pub fn is_valid_phone(number: &str) -> bool {
    PHONE_RE.is_match(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user example.com"));
    }

    #[test]
    fn accepts_e164_phone_numbers() {
        assert!(is_valid_phone("+61412345678"));
        assert!(is_valid_phone("+8613800138000"));
    }

    #[test]
    fn rejects_local_phone_numbers() {
        assert!(!is_valid_phone("0412345678"));
        assert!(!is_valid_phone("+0412345678"));
        assert!(!is_valid_phone("+61"));
    }
}
