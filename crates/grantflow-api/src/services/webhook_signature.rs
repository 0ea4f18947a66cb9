//! Webhook payload signature verification.
//!
//! The billing provider signs each delivery with HMAC-SHA256 over
//! `{timestamp}.{body}` and sends the result in the `Billing-Signature`
//! header as `t=<timestamp>,v1=<hex>`. Comparison is constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature header on webhook deliveries.
pub const SIGNATURE_HEADER: &str = "Billing-Signature";

/// A parsed `t=<timestamp>,v1=<hex>` signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSignature {
    /// Unix timestamp the sender signed over.
    pub timestamp: String,
    /// Hex-encoded HMAC-SHA256 signature.
    pub signature: String,
}

/// Parse a `t=<timestamp>,v1=<hex>` signature header value.
#[must_use]
pub fn parse_signature_header(header: &str) -> Option<WebhookSignature> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) if !value.is_empty() => timestamp = Some(value.to_string()),
            Some(("v1", value)) if !value.is_empty() => signature = Some(value.to_string()),
            _ => {}
        }
    }

    Some(WebhookSignature {
        timestamp: timestamp?,
        signature: signature?,
    })
}

/// Compute the HMAC-SHA256 signature over `{timestamp}.{body}`.
///
/// Returns a hex-encoded string.
#[must_use]
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    hex::encode(mac.finalize().into_bytes())
}

/// Verify a signature using constant-time comparison.
#[must_use]
pub fn verify_signature(expected_hex: &str, secret: &str, timestamp: &str, body: &[u8]) -> bool {
    let computed = compute_signature(secret, timestamp, body);
    constant_time_eq(expected_hex.as_bytes(), computed.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_header() {
        let parsed = parse_signature_header("t=1706400000,v1=deadbeef").unwrap();
        assert_eq!(parsed.timestamp, "1706400000");
        assert_eq!(parsed.signature, "deadbeef");
    }

    #[test]
    fn parse_tolerates_spacing_and_order() {
        let parsed = parse_signature_header("v1=deadbeef, t=1706400000").unwrap();
        assert_eq!(parsed.timestamp, "1706400000");
        assert_eq!(parsed.signature, "deadbeef");
    }

    #[test]
    fn parse_rejects_missing_parts() {
        assert!(parse_signature_header("t=1706400000").is_none());
        assert!(parse_signature_header("v1=deadbeef").is_none());
        assert!(parse_signature_header("").is_none());
        assert!(parse_signature_header("t=,v1=").is_none());
    }

    #[test]
    fn signature_is_deterministic() {
        let a = compute_signature("secret", "1706400000", b"payload");
        let b = compute_signature("secret", "1706400000", b"payload");
        assert_eq!(a, b);
        // SHA256 = 32 bytes = 64 hex chars
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn verify_accepts_valid() {
        let secret = "whsec_test";
        let timestamp = "1706400000";
        let body = br#"{"type":"customer.subscription.updated"}"#;

        let sig = compute_signature(secret, timestamp, body);
        assert!(verify_signature(&sig, secret, timestamp, body));
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let sig = compute_signature("whsec_test", "1706400000", b"original");
        assert!(!verify_signature(&sig, "whsec_test", "1706400000", b"tampered"));
    }

    #[test]
    fn verify_rejects_tampered_timestamp() {
        let sig = compute_signature("whsec_test", "1706400000", b"body");
        assert!(!verify_signature(&sig, "whsec_test", "1706400001", b"body"));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let sig = compute_signature("whsec_test", "1706400000", b"body");
        assert!(!verify_signature(&sig, "whsec_other", "1706400000", b"body"));
    }
}
