//! # Digital Signatures Module
//!
//! RSA-PSS signatures over SHA-512, used to prove possession of the
//! installation's signing private key.
//!
//! ## The Salt-Length Contract
//!
//! PSS takes a salt whose length is a free parameter — but signer and
//! verifier must agree on it exactly, or every valid signature fails
//! verification. This protocol pins the salt to the maximum the modulus
//! admits:
//!
//! ```text
//! salt_length = ceil((modulus_bits - 1) / 8) - hash_output_bytes - 2
//!             = ceil(4095 / 8) - 64 - 2
//!             = 512 - 66
//!             = 446 bytes
//! ```
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Hash | SHA-512 |
//! | Salt length | 446 bytes ([`PSS_SALT_LEN`]) |
//! | Signature size | 512 bytes ([`SIGNATURE_SIZE`]) |
//!
//! PSS is randomized: signing the same message twice yields different
//! signatures, both of which verify.

use rand::rngs::OsRng;
use rsa::{Pss, RsaPublicKey};
use sha2::{Digest, Sha512};

use crate::crypto::keys::SigningKeyPair;
use crate::crypto::{HASH_OUTPUT_BYTES, MODULUS_BITS, MODULUS_BYTES};
use crate::error::{Error, Result};

/// PSS salt length in bytes, pinned for a 4096-bit modulus with SHA-512
pub const PSS_SALT_LEN: usize = (MODULUS_BITS - 1).div_ceil(8) - HASH_OUTPUT_BYTES - 2;

/// Size of a produced signature in bytes (equal to the modulus size)
pub const SIGNATURE_SIZE: usize = MODULUS_BYTES;

/// Sign a message with RSA-PSS
///
/// The message is hashed with SHA-512 and signed with the fixed salt
/// length. The caller passes the raw message (e.g. challenge bytes), not
/// a digest.
///
/// ## Returns
///
/// A 512-byte signature.
///
/// ## Example
///
/// ```ignore
/// let pair = SigningKeyPair::generate()?;
/// let signature = sign(&pair, b"challenge bytes")?;
/// ```
pub fn sign(keypair: &SigningKeyPair, message: &[u8]) -> Result<Vec<u8>> {
    let digest = Sha512::digest(message);
    keypair
        .private_key()
        .sign_with_rng(&mut OsRng, Pss::new_with_salt::<Sha512>(PSS_SALT_LEN), &digest)
        .map_err(|e| Error::SigningFailed(e.to_string()))
}

/// Verify an RSA-PSS signature
///
/// Must use the same salt length as [`sign`]; any other parameter rejects
/// valid signatures.
///
/// ## Returns
///
/// `Ok(())` if valid, `Err(VerificationFailed)` if invalid.
pub fn verify(public_key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> Result<()> {
    let digest = Sha512::digest(message);
    public_key
        .verify(Pss::new_with_salt::<Sha512>(PSS_SALT_LEN), &digest, signature)
        .map_err(|_| Error::VerificationFailed)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::SIGNING_PAIR;

    #[test]
    fn test_salt_length_is_pinned() {
        assert_eq!(PSS_SALT_LEN, 446);
    }

    #[test]
    fn test_sign_verify() {
        let message = [0x01u8, 0x02, 0x03];

        let signature = sign(&SIGNING_PAIR, &message).unwrap();
        assert_eq!(signature.len(), SIGNATURE_SIZE);

        verify(SIGNING_PAIR.public_key(), &message, &signature).unwrap();
    }

    #[test]
    fn test_resigning_is_randomized_but_both_verify() {
        let message = b"fresh challenge";

        let sig1 = sign(&SIGNING_PAIR, message).unwrap();
        let sig2 = sign(&SIGNING_PAIR, message).unwrap();

        // PSS salts are random, so the signatures differ...
        assert_ne!(sig1, sig2);

        // ...but both verify under the same parameters.
        verify(SIGNING_PAIR.public_key(), message, &sig1).unwrap();
        verify(SIGNING_PAIR.public_key(), message, &sig2).unwrap();
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let signature = sign(&SIGNING_PAIR, b"signed message").unwrap();
        let result = verify(SIGNING_PAIR.public_key(), b"other message", &signature);
        assert!(matches!(result, Err(Error::VerificationFailed)));
    }

    #[test]
    fn test_verify_tampered_signature_fails() {
        let mut signature = sign(&SIGNING_PAIR, b"message").unwrap();
        signature[0] ^= 0xff;
        assert!(verify(SIGNING_PAIR.public_key(), b"message", &signature).is_err());
    }

    #[test]
    fn test_verify_with_wrong_salt_length_fails() {
        let message = b"salt contract";
        let signature = sign(&SIGNING_PAIR, message).unwrap();
        let digest = sha2::Sha512::digest(message);

        // A verifier using the digest-sized salt must reject our signatures.
        let result = SIGNING_PAIR.public_key().verify(
            Pss::new_with_salt::<sha2::Sha512>(HASH_OUTPUT_BYTES),
            &digest,
            &signature,
        );
        assert!(result.is_err());
    }
}
