//! One-time code and password-reset token generation.
//!
//! OTPs are 6-digit numeric codes compared verbatim against the stored
//! value. Reset tokens are 32 random bytes handed to the user hex-encoded;
//! only the SHA-256 of the raw token is persisted.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::core::error::{AppError, Result};
use crate::shared::constants::RESET_TOKEN_BYTES;

/// Generate a 6-digit numeric one-time code, zero-padded.
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Generate a raw password-reset token (hex-encoded random bytes).
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hash of a raw reset token, hex-encoded. This is the stored form.
pub fn hash_reset_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a presented OTP against the stored code and expiry.
///
/// Order matters: a wrong code is always "invalid", and only a matching
/// code past its window is reported as "expired".
pub fn check_otp(
    stored_code: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    presented: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let stored = stored_code.ok_or_else(|| {
        AppError::BadRequest("No verification code outstanding. Request a new one".to_string())
    })?;

    if stored != presented {
        return Err(AppError::BadRequest(
            "Invalid verification code".to_string(),
        ));
    }

    let expired = expires_at.map(|at| at < now).unwrap_or(true);
    if expired {
        return Err(AppError::BadRequest(
            "Verification code has expired. Request a new one".to_string(),
        ));
    }

    Ok(())
}

/// Check a presented raw reset token against the stored hash and expiry.
///
/// Cleared fields (the token was already used) fail the same way a wrong
/// token does, so a token can succeed at most once.
pub fn check_reset_token(
    stored_hash: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    presented_raw: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let invalid = || AppError::BadRequest("Invalid or expired reset token".to_string());

    let stored = stored_hash.ok_or_else(invalid)?;
    if stored != hash_reset_token(presented_raw) {
        return Err(invalid());
    }

    let expired = expires_at.map(|at| at < now).unwrap_or(true);
    if expired {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::OTP_REGEX;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert!(OTP_REGEX.is_match(&code), "bad otp: {}", code);
        }
    }

    #[test]
    fn reset_token_is_64_hex_chars() {
        let token = generate_reset_token();
        assert_eq!(token.len(), RESET_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn reset_tokens_are_unique() {
        assert_ne!(generate_reset_token(), generate_reset_token());
    }

    #[test]
    fn token_hash_is_deterministic_and_differs_from_raw() {
        let raw = generate_reset_token();
        let hash = hash_reset_token(&raw);
        assert_eq!(hash, hash_reset_token(&raw));
        assert_ne!(hash, raw);
        assert_eq!(hash.len(), 64);
    }

    fn bad_request_message(result: crate::core::error::Result<()>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn matching_unexpired_otp_is_accepted() {
        let now = Utc::now();
        let window = now + chrono::Duration::minutes(10);
        assert!(check_otp(Some("123456"), Some(window), "123456", now).is_ok());
    }

    #[test]
    fn wrong_otp_is_invalid_even_when_unexpired() {
        let now = Utc::now();
        let window = now + chrono::Duration::minutes(10);
        let msg = bad_request_message(check_otp(Some("123456"), Some(window), "654321", now));
        assert!(msg.contains("Invalid"), "got: {}", msg);
    }

    #[test]
    fn matching_otp_past_window_is_expired_not_invalid() {
        let now = Utc::now();
        let window = now - chrono::Duration::seconds(1);
        let msg = bad_request_message(check_otp(Some("123456"), Some(window), "123456", now));
        assert!(msg.contains("expired"), "got: {}", msg);
        assert!(!msg.contains("Invalid"), "got: {}", msg);
    }

    #[test]
    fn missing_otp_asks_for_a_new_code() {
        let now = Utc::now();
        let msg = bad_request_message(check_otp(None, None, "123456", now));
        assert!(msg.contains("Request a new one"), "got: {}", msg);
    }

    #[test]
    fn reset_token_succeeds_then_fails_once_fields_are_cleared() {
        let now = Utc::now();
        let window = now + chrono::Duration::hours(1);
        let raw = generate_reset_token();
        let stored = hash_reset_token(&raw);

        assert!(check_reset_token(Some(&stored), Some(window), &raw, now).is_ok());

        // After a successful reset both fields are nulled out
        assert!(check_reset_token(None, None, &raw, now).is_err());
    }

    #[test]
    fn wrong_reset_token_is_rejected() {
        let now = Utc::now();
        let window = now + chrono::Duration::hours(1);
        let stored = hash_reset_token(&generate_reset_token());

        assert!(check_reset_token(Some(&stored), Some(window), &generate_reset_token(), now).is_err());
    }

    #[test]
    fn expired_reset_token_is_rejected_even_when_hash_matches() {
        let now = Utc::now();
        let window = now - chrono::Duration::seconds(1);
        let raw = generate_reset_token();
        let stored = hash_reset_token(&raw);

        assert!(check_reset_token(Some(&stored), Some(window), &raw, now).is_err());
    }
}
