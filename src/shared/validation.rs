use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating agency contact phone numbers.
    /// Optional leading "+", then 7-15 digits (spaces and hyphens allowed between groups).
    /// - Valid: "+6281234567890", "0812-3456-7890", "021 555 0199"
    /// - Invalid: "phone", "12", "++62812"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9]{2,4}([ -]?[0-9]{2,4}){1,4}$").unwrap();

    /// Regex for the 6-digit email verification code.
    pub static ref OTP_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+6281234567890"));
        assert!(PHONE_REGEX.is_match("0812-3456-7890"));
        assert!(PHONE_REGEX.is_match("021 555 0199"));
        assert!(PHONE_REGEX.is_match("08123456"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("phone"));
        assert!(!PHONE_REGEX.is_match("12"));
        assert!(!PHONE_REGEX.is_match("++62812345678"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_otp_regex() {
        assert!(OTP_REGEX.is_match("012345"));
        assert!(OTP_REGEX.is_match("999999"));
        assert!(!OTP_REGEX.is_match("12345")); // too short
        assert!(!OTP_REGEX.is_match("1234567")); // too long
        assert!(!OTP_REGEX.is_match("12a456")); // non-digit
    }
}
