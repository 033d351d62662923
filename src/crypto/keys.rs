//! # Key Management
//!
//! This module handles RSA key-pair generation and interchange-format
//! export/import.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SigningKeyPair (RSA-PSS)                                       │   │
//! │  │  ────────────────────────                                        │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Proving possession of the installation identity              │   │
//! │  │  • Signing server-issued login challenges                       │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  EncryptionKeyPair (RSA-OAEP)                                   │   │
//! │  │  ────────────────────────────                                    │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Receiving confidential payloads from the server              │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Both pairs: 4096-bit modulus, e = 65537, SHA-512-based padding.       │
//! │  The two pairs are separate types so a signing key can never be        │
//! │  passed where an encryption key is expected.                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Interchange Formats
//!
//! | Half | Format | Notes |
//! |------|--------|-------|
//! | Private | PKCS#8 DER | Re-importable; wrapped in `Zeroizing` on export |
//! | Public | SPKI DER | Input to the PEM portable-text form |

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::crypto::{MODULUS_BITS, PUBLIC_EXPONENT};
use crate::error::{Error, Result};

/// Generate a fresh RSA private/public pair with the fixed parameters.
fn generate_pair() -> Result<(RsaPrivateKey, RsaPublicKey)> {
    let exponent = BigUint::from(PUBLIC_EXPONENT);
    let private = RsaPrivateKey::new_with_exp(&mut OsRng, MODULUS_BITS, &exponent)
        .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;
    let public = private.to_public_key();
    Ok((private, public))
}

/// RSA-PSS signing key pair
///
/// Holds the private half used to sign login challenges and the public
/// half published to the server at registration.
pub struct SigningKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl SigningKeyPair {
    /// Generate a new random signing key pair
    ///
    /// Every call produces a fresh, independent pair; nothing is cached.
    /// Fails with `KeyGenerationFailed` if the provider fails, which is
    /// fatal for the enrollment flow.
    pub fn generate() -> Result<Self> {
        let (private, public) = generate_pair()?;
        Ok(Self { private, public })
    }

    /// Re-import a pair from the private half's PKCS#8 DER encoding
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| Error::InvalidKey(format!("PKCS#8 import failed: {}", e)))?;
        let public = private.to_public_key();
        Ok(Self { private, public })
    }

    /// Export the private half as PKCS#8 DER
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn private_key_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let doc = self
            .private
            .to_pkcs8_der()
            .map_err(|e| Error::SerializationError(format!("PKCS#8 export failed: {}", e)))?;
        Ok(Zeroizing::new(doc.as_bytes().to_vec()))
    }

    /// Export the public half as SPKI DER
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let doc = self
            .public
            .to_public_key_der()
            .map_err(|e| Error::SerializationError(format!("SPKI export failed: {}", e)))?;
        Ok(doc.into_vec())
    }

    /// Get the public half
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Get the private half (crate-internal; used by the signing primitive)
    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }
}

/// RSA-OAEP encryption key pair
///
/// Generated and registered alongside the signing pair so the server can
/// address confidential payloads to this installation.
pub struct EncryptionKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl EncryptionKeyPair {
    /// Generate a new random encryption key pair
    pub fn generate() -> Result<Self> {
        let (private, public) = generate_pair()?;
        Ok(Self { private, public })
    }

    /// Re-import a pair from the private half's PKCS#8 DER encoding
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| Error::InvalidKey(format!("PKCS#8 import failed: {}", e)))?;
        let public = private.to_public_key();
        Ok(Self { private, public })
    }

    /// Export the private half as PKCS#8 DER
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn private_key_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let doc = self
            .private
            .to_pkcs8_der()
            .map_err(|e| Error::SerializationError(format!("PKCS#8 export failed: {}", e)))?;
        Ok(Zeroizing::new(doc.as_bytes().to_vec()))
    }

    /// Export the public half as SPKI DER
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let doc = self
            .public
            .to_public_key_der()
            .map_err(|e| Error::SerializationError(format!("SPKI export failed: {}", e)))?;
        Ok(doc.into_vec())
    }

    /// Get the public half
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Get the private half (crate-internal; used by the decryption primitive)
    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }
}

/// Import a public key from its SPKI DER encoding
///
/// Used on the verification side, where only the public half is available.
pub fn public_key_from_spki_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| Error::InvalidKey(format!("SPKI import failed: {}", e)))
}

/// Short hex fingerprint of a DER-encoded key (for logs and display)
///
/// Never reveals key material beyond what the public record already carries;
/// do not call this on private-key DER.
pub fn key_fingerprint(der: &[u8]) -> String {
    let digest = Sha256::digest(der);
    hex::encode(&digest[..8])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ENCRYPTION_PAIR, SIGNING_PAIR};

    #[test]
    fn test_pairs_are_distinct() {
        // The shared fixtures were generated independently
        assert_ne!(
            SIGNING_PAIR.public_key_der().unwrap(),
            ENCRYPTION_PAIR.public_key_der().unwrap()
        );
    }

    #[test]
    fn test_modulus_size() {
        use rsa::traits::PublicKeyParts;
        assert_eq!(SIGNING_PAIR.public_key().n().bits(), MODULUS_BITS);
        assert_eq!(ENCRYPTION_PAIR.public_key().n().bits(), MODULUS_BITS);
    }

    #[test]
    fn test_public_exponent() {
        use rsa::traits::PublicKeyParts;
        assert_eq!(SIGNING_PAIR.public_key().e(), &BigUint::from(65537u64));
    }

    #[test]
    fn test_private_der_round_trip() {
        let der = SIGNING_PAIR.private_key_der().unwrap();
        let restored = SigningKeyPair::from_pkcs8_der(&der).unwrap();
        assert_eq!(
            restored.public_key_der().unwrap(),
            SIGNING_PAIR.public_key_der().unwrap()
        );
    }

    #[test]
    fn test_public_der_import() {
        let der = SIGNING_PAIR.public_key_der().unwrap();
        let imported = public_key_from_spki_der(&der).unwrap();
        assert_eq!(&imported, SIGNING_PAIR.public_key());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(SigningKeyPair::from_pkcs8_der(b"not a key").is_err());
        assert!(public_key_from_spki_der(b"not a key").is_err());
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let der = SIGNING_PAIR.public_key_der().unwrap();
        let fp = key_fingerprint(&der);
        assert_eq!(fp.len(), 16);
        assert_eq!(fp, key_fingerprint(&der));
    }
}
