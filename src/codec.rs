//! # Codec
//!
//! Pure data transforms used on the wire: binary↔text encoding and the
//! portable-text (PEM) framing for public keys. No state, no I/O.
//!
//! ## Wire Formats
//!
//! | Transform | Format | Used for |
//! |-----------|--------|----------|
//! | `encode_base64` / `decode_base64` | base64, standard alphabet, padded | challenges, signatures |
//! | `public_key_to_pem` / `public_key_from_pem` | PEM over SPKI DER | public-key transport |
//!
//! The PEM framing is a wire-format requirement, not cosmetics: the server
//! parses exactly these delimiters with the whole base64 body on the single
//! line between them.
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! MIICIjANBgkqhkiG9w0BAQEFAAOCAg8AMIICCgKCAgEA...
//! -----END PUBLIC KEY-----
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// Header line of the portable public-key text form
pub const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";

/// Footer line of the portable public-key text form
pub const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

/// Encode bytes as base64 text (standard alphabet, padded)
///
/// Round-trip-exact with [`decode_base64`] for every byte sequence,
/// including the empty one and sequences containing zero bytes.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text back into bytes
///
/// Fails with `DecodeFailed` on any input that is not valid padded base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

/// Wrap an SPKI-encoded public key in PEM framing
///
/// The body is a single base64 line between the literal header and footer
/// lines. There is no trailing newline after the footer.
pub fn public_key_to_pem(spki_der: &[u8]) -> String {
    format!("{}\n{}\n{}", PEM_HEADER, encode_base64(spki_der), PEM_FOOTER)
}

/// Parse PEM framing back into the SPKI-encoded public key
///
/// Accepts bodies split across multiple lines, but requires the exact
/// header and footer delimiters.
pub fn public_key_from_pem(pem: &str) -> Result<Vec<u8>> {
    let trimmed = pem.trim();

    let body = trimmed
        .strip_prefix(PEM_HEADER)
        .and_then(|rest| rest.strip_suffix(PEM_FOOTER))
        .ok_or_else(|| Error::DecodeFailed("missing PEM public key delimiters".into()))?;

    let compact: String = body.split_whitespace().collect();
    decode_base64(&compact)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let cases: &[&[u8]] = &[
            b"",
            b"\x00",
            b"\x00\x00\x00",
            b"hello world",
            b"\x01\x02\x03",
            b"\xff\xfe\x00\x01",
        ];

        for case in cases {
            let encoded = encode_base64(case);
            let decoded = decode_base64(&encoded).unwrap();
            assert_eq!(&decoded, case);
        }
    }

    #[test]
    fn test_base64_round_trip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        let decoded = decode_base64(&encode_base64(&bytes)).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        assert!(decode_base64("not valid base64!!").is_err());
    }

    #[test]
    fn test_pem_framing_exact() {
        let pem = public_key_to_pem(b"\x30\x82\x01\x02");

        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(pem.ends_with("\n-----END PUBLIC KEY-----"));
        assert_eq!(pem.lines().count(), 3);
    }

    #[test]
    fn test_pem_round_trip() {
        let der = vec![0x30, 0x82, 0x02, 0x22, 0x00, 0xff];
        let pem = public_key_to_pem(&der);
        let parsed = public_key_from_pem(&pem).unwrap();
        assert_eq!(parsed, der);
    }

    #[test]
    fn test_pem_rejects_missing_delimiters() {
        assert!(public_key_from_pem("QUJD").is_err());
        assert!(public_key_from_pem("-----BEGIN PUBLIC KEY-----\nQUJD").is_err());
    }

    #[test]
    fn test_pem_accepts_multiline_body() {
        let der = vec![0xabu8; 96];
        let body = encode_base64(&der);
        let (first, second) = body.split_at(64);
        let pem = format!("{}\n{}\n{}\n{}", PEM_HEADER, first, second, PEM_FOOTER);
        assert_eq!(public_key_from_pem(&pem).unwrap(), der);
    }
}
