//! Stripe webhook signature verification.
//!
//! Verifies the `Stripe-Signature` header with HMAC-SHA256 over
//! `"{timestamp}.{raw body}"`. The body must be the exact bytes received;
//! re-serialized JSON will not verify.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::purchase::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age for signed events (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_SKEW_SECS: i64 = 60;

/// Parsed components of a `Stripe-Signature` header.
///
/// Format: `t=<timestamp>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`. Several `v1`
/// entries appear while a signing secret is being rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| malformed("invalid header format"))?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| malformed("invalid timestamp"))?,
                    );
                }
                "v1" => {
                    let bytes =
                        hex::decode(value.trim()).map_err(|_| malformed("invalid v1 signature hex"))?;
                    v1_signatures.push(bytes);
                }
                // v0 and unknown schemes are ignored
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| malformed("missing timestamp"))?;
        if v1_signatures.is_empty() {
            return Err(malformed("missing v1 signature"));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

fn malformed(reason: &str) -> WebhookError {
    WebhookError::MalformedSignature(reason.to_string())
}

/// Verifies webhook signatures against the configured signing secret.
#[derive(Clone)]
pub struct WebhookSignatureVerifier {
    secret: SecretString,
    tolerance_secs: i64,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides the maximum accepted event age.
    pub fn with_tolerance_secs(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies `header` against `payload` using the current time.
    pub fn verify(&self, payload: &[u8], header: &str) -> Result<(), WebhookError> {
        self.verify_at(payload, header, chrono::Utc::now().timestamp())
    }

    /// Verifies `header` against `payload` as of `now` (Unix seconds).
    pub fn verify_at(&self, payload: &[u8], header: &str, now: i64) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(header)?;

        let Some(age) = now.checked_sub(header.timestamp) else {
            tracing::warn!(event_timestamp = header.timestamp, "Webhook timestamp out of range");
            return Err(WebhookError::InvalidTimestamp);
        };
        if age > self.tolerance_secs {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Webhook signature too old - possible replay"
            );
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_FUTURE_SKEW_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook signature from the future"
            );
            return Err(WebhookError::InvalidTimestamp);
        }

        let expected = self.compute_signature(header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));

        if !matched {
            tracing::warn!(event_timestamp = header.timestamp, "Invalid webhook signature");
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a `Stripe-Signature` header value for `payload`.
///
/// Produces what Stripe would send for the given secret; used by local
/// tooling and tests to deliver signed events.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_704_067_200;

    fn verifier() -> WebhookSignatureVerifier {
        WebhookSignatureVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_single_v1() {
        let header = SignatureHeader::parse(&format!("t=1234567890,v1={}", "a".repeat(64))).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
    }

    #[test]
    fn parse_header_collects_multiple_v1_and_ignores_v0() {
        let header = SignatureHeader::parse(&format!(
            "t=1,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        ))
        .unwrap();

        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let result = SignatureHeader::parse(&format!("v1={}", "a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::MalformedSignature(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890");
        assert!(matches!(result, Err(WebhookError::MalformedSignature(_))));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=not_valid_hex");
        assert!(matches!(result, Err(WebhookError::MalformedSignature(_))));
    }

    #[test]
    fn parse_header_without_equals_fails() {
        assert!(SignatureHeader::parse("garbage").is_err());
        assert!(SignatureHeader::parse("").is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_valid_signature() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = signature_header(TEST_SECRET, NOW, payload);

        assert_eq!(verifier().verify_at(payload, &header, NOW), Ok(()));
    }

    #[test]
    fn verify_accepts_any_matching_v1() {
        let payload = br#"{"id":"evt_1"}"#;
        let valid = signature_header(TEST_SECRET, NOW, payload);
        let valid_sig = valid.split("v1=").nth(1).unwrap();
        let header = format!("t={},v1={},v1={}", NOW, "0".repeat(64), valid_sig);

        assert_eq!(verifier().verify_at(payload, &header, NOW), Ok(()));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = signature_header("whsec_other", NOW, payload);

        assert_eq!(
            verifier().verify_at(payload, &header, NOW),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let header = signature_header(TEST_SECRET, NOW, br#"{"amount":100}"#);

        assert_eq!(
            verifier().verify_at(br#"{"amount":999}"#, &header, NOW),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn verify_rejects_reformatted_json() {
        let original = br#"{"id":"evt_1","type":"x"}"#;
        let reformatted = br#"{ "id": "evt_1", "type": "x" }"#;
        let header = signature_header(TEST_SECRET, NOW, original);

        assert_eq!(
            verifier().verify_at(reformatted, &header, NOW),
            Err(WebhookError::InvalidSignature)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_accepts_event_at_tolerance_boundary() {
        let payload = b"{}";
        let header = signature_header(TEST_SECRET, NOW - 300, payload);
        assert_eq!(verifier().verify_at(payload, &header, NOW), Ok(()));
    }

    #[test]
    fn verify_rejects_event_past_tolerance() {
        let payload = b"{}";
        let header = signature_header(TEST_SECRET, NOW - 301, payload);
        assert_eq!(
            verifier().verify_at(payload, &header, NOW),
            Err(WebhookError::TimestampOutOfRange)
        );
    }

    #[test]
    fn verify_honours_custom_tolerance() {
        let payload = b"{}";
        let header = signature_header(TEST_SECRET, NOW - 100, payload);
        let strict = verifier().with_tolerance_secs(60);
        assert_eq!(
            strict.verify_at(payload, &header, NOW),
            Err(WebhookError::TimestampOutOfRange)
        );
    }

    #[test]
    fn verify_allows_small_future_skew() {
        let payload = b"{}";
        let header = signature_header(TEST_SECRET, NOW + 30, payload);
        assert_eq!(verifier().verify_at(payload, &header, NOW), Ok(()));
    }

    #[test]
    fn verify_rejects_far_future_timestamp() {
        let payload = b"{}";
        let header = signature_header(TEST_SECRET, NOW + 120, payload);
        assert_eq!(
            verifier().verify_at(payload, &header, NOW),
            Err(WebhookError::InvalidTimestamp)
        );
    }

    #[test]
    fn verify_rejects_extreme_timestamps_without_overflow() {
        let payload = b"{}";
        for timestamp in [i64::MIN, i64::MAX] {
            let header = format!("t={},v1=00", timestamp);
            assert_eq!(
                verifier().verify_at(payload, &header, NOW),
                Err(WebhookError::InvalidTimestamp)
            );
        }
    }
}
