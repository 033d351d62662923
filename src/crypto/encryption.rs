//! # Encryption Module
//!
//! RSA-OAEP (SHA-512) encryption for the installation's encryption pair.
//!
//! The encryption pair is published to the server at registration so it can
//! address confidential payloads to this installation; this module provides
//! the matching encrypt/decrypt operations with the same fixed parameters
//! as generation.
//!
//! OAEP with a 4096-bit modulus and SHA-512 can wrap at most
//! `512 - 2*64 - 2 = 382` bytes per operation — it is meant for small
//! payloads such as wrapped symmetric keys, not bulk data.

use rand::rngs::OsRng;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha512;

use crate::crypto::keys::EncryptionKeyPair;
use crate::crypto::{HASH_OUTPUT_BYTES, MODULUS_BYTES};
use crate::error::{Error, Result};

/// Maximum plaintext length for one OAEP operation
pub const MAX_PLAINTEXT_LEN: usize = MODULUS_BYTES - 2 * HASH_OUTPUT_BYTES - 2;

/// Encrypt a small payload to an encryption public key
///
/// ## Errors
///
/// `EncryptionFailed` if the plaintext exceeds [`MAX_PLAINTEXT_LEN`] or the
/// underlying operation fails.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    if plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(Error::EncryptionFailed(format!(
            "plaintext is {} bytes, OAEP limit is {}",
            plaintext.len(),
            MAX_PLAINTEXT_LEN
        )));
    }

    public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha512>(), plaintext)
        .map_err(|e| Error::EncryptionFailed(e.to_string()))
}

/// Decrypt a payload with the encryption pair's private half
pub fn decrypt(keypair: &EncryptionKeyPair, ciphertext: &[u8]) -> Result<Vec<u8>> {
    keypair
        .private_key()
        .decrypt(Oaep::new::<Sha512>(), ciphertext)
        .map_err(|e| Error::DecryptionFailed(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ENCRYPTION_PAIR;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = b"wrapped session key material";

        let ciphertext = encrypt(ENCRYPTION_PAIR.public_key(), plaintext).unwrap();
        assert_eq!(ciphertext.len(), MODULUS_BYTES);

        let decrypted = decrypt(&ENCRYPTION_PAIR, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_oversized_plaintext_rejected() {
        let plaintext = vec![0u8; MAX_PLAINTEXT_LEN + 1];
        let result = encrypt(ENCRYPTION_PAIR.public_key(), &plaintext);
        assert!(matches!(result, Err(Error::EncryptionFailed(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut ciphertext = encrypt(ENCRYPTION_PAIR.public_key(), b"payload").unwrap();
        ciphertext[0] ^= 0x01;
        assert!(decrypt(&ENCRYPTION_PAIR, &ciphertext).is_err());
    }
}
