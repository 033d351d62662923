//! # Challenge Signer
//!
//! Produces signatures over server-issued login challenges using the stored
//! signing private key.
//!
//! The signer owns no key material of its own: every signature loads the
//! signing-private record from the [`KeyStore`], re-imports it as a signing
//! key handle, and signs with the fixed PSS parameters. The challenge bytes
//! are opaque to the signer — freshness and uniqueness are the server's
//! responsibility.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::crypto::{signing, SigningKeyPair};
use crate::error::Result;
use crate::storage::{KeyRole, KeyStore};

/// Signs login challenges with the stored signing private key
pub struct ChallengeSigner {
    store: Arc<KeyStore>,
}

impl ChallengeSigner {
    /// Create a signer over a key store
    pub fn new(store: Arc<KeyStore>) -> Self {
        Self { store }
    }

    /// Sign challenge bytes
    ///
    /// ## Errors
    ///
    /// - `KeyNotFound` if the signing-private record is absent (the
    ///   installation has not enrolled, or its storage was cleared)
    /// - `InvalidKey` if the stored record cannot be re-imported
    /// - `SigningFailed` if the cryptographic operation itself fails
    ///
    /// All of these abort the current login attempt and surface to the
    /// caller; none are retried here.
    pub fn sign(&self, challenge: &[u8]) -> Result<Vec<u8>> {
        let record = self.store.get(KeyRole::SigningPrivate)?;
        let der = Zeroizing::new(record.der);

        let keypair = SigningKeyPair::from_pkcs8_der(&der)?;
        signing::sign(&keypair, challenge)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SIGNATURE_SIZE;
    use crate::error::Error;
    use crate::storage::StoredKeyRecord;
    use crate::test_util::SIGNING_PAIR;

    fn store_with_signing_key() -> Arc<KeyStore> {
        let store = KeyStore::open(None).unwrap();
        store
            .put(
                KeyRole::SigningPrivate,
                &StoredKeyRecord {
                    der: SIGNING_PAIR.private_key_der().unwrap().to_vec(),
                    pem: None,
                },
            )
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_sign_uses_stored_key() {
        let signer = ChallengeSigner::new(store_with_signing_key());

        let challenge = [0x01u8, 0x02, 0x03];
        let signature = signer.sign(&challenge).unwrap();

        assert_eq!(signature.len(), SIGNATURE_SIZE);
        signing::verify(SIGNING_PAIR.public_key(), &challenge, &signature).unwrap();
    }

    #[test]
    fn test_sign_without_key_fails() {
        let store = Arc::new(KeyStore::open(None).unwrap());
        let signer = ChallengeSigner::new(store);

        let result = signer.sign(b"challenge");
        assert!(matches!(result, Err(Error::KeyNotFound(_))));
    }

    #[test]
    fn test_sign_with_corrupt_record_fails() {
        let store = Arc::new(KeyStore::open(None).unwrap());
        store
            .put(
                KeyRole::SigningPrivate,
                &StoredKeyRecord {
                    der: b"not a pkcs8 blob".to_vec(),
                    pem: None,
                },
            )
            .unwrap();

        let signer = ChallengeSigner::new(store);
        assert!(matches!(signer.sign(b"challenge"), Err(Error::InvalidKey(_))));
    }
}
