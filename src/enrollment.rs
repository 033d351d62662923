//! # Enrollment
//!
//! Install-time creation of the installation's cryptographic identity.
//!
//! ## Enrollment Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENROLLMENT FLOW                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Generate                                                            │
//! │     ┌──────────────────┐   ┌──────────────────┐                        │
//! │     │ SigningKeyPair   │   │ EncryptionKeyPair│   fresh, independent   │
//! │     │ (RSA-PSS 4096)   │   │ (RSA-OAEP 4096)  │   pairs               │
//! │     └────────┬─────────┘   └────────┬─────────┘                        │
//! │              │                      │                                   │
//! │  2. Export   ▼                      ▼                                   │
//! │     PKCS#8 DER (private), SPKI DER + PEM (public)                      │
//! │              │                      │                                   │
//! │  3. Persist  ▼                      ▼                                   │
//! │     KeyStore rows: signing.{public,private},                           │
//! │                    encryption.{public,private}                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Key generation failure is fatal here: without a signing identity there is
//! no degraded mode, so the error propagates to the installer untouched.
//! Records are write-once — a second enrollment attempt fails with
//! `AlreadyEnrolled` instead of rotating keys (rotation is a different,
//! unsupported operation).

use crate::codec;
use crate::crypto::{key_fingerprint, EncryptionKeyPair, SigningKeyPair};
use crate::error::{Error, Result};
use crate::storage::{KeyRole, KeyStore, StoredKeyRecord};

/// Generate both key pairs and persist all key records
///
/// ## Errors
///
/// - `AlreadyEnrolled` if any key record already exists
/// - `KeyGenerationFailed` if the cryptographic provider fails (fatal)
/// - storage errors if persistence fails
pub fn enroll(store: &KeyStore) -> Result<()> {
    if is_enrolled(store)? {
        return Err(Error::AlreadyEnrolled);
    }

    tracing::info!("Generating installation key pairs (RSA-4096, this can take a moment)");

    let signing = SigningKeyPair::generate()?;
    let encryption = EncryptionKeyPair::generate()?;

    let signing_public_der = signing.public_key_der()?;
    let encryption_public_der = encryption.public_key_der()?;

    store.put(
        KeyRole::SigningPublic,
        &StoredKeyRecord {
            pem: Some(codec::public_key_to_pem(&signing_public_der)),
            der: signing_public_der.clone(),
        },
    )?;
    store.put(
        KeyRole::SigningPrivate,
        &StoredKeyRecord {
            der: signing.private_key_der()?.to_vec(),
            pem: None,
        },
    )?;
    store.put(
        KeyRole::EncryptionPublic,
        &StoredKeyRecord {
            pem: Some(codec::public_key_to_pem(&encryption_public_der)),
            der: encryption_public_der.clone(),
        },
    )?;
    store.put(
        KeyRole::EncryptionPrivate,
        &StoredKeyRecord {
            der: encryption.private_key_der()?.to_vec(),
            pem: None,
        },
    )?;

    tracing::info!(
        signing_key = %key_fingerprint(&signing_public_der),
        encryption_key = %key_fingerprint(&encryption_public_der),
        "Enrollment complete"
    );

    Ok(())
}

/// Check whether this installation has enrolled
///
/// Returns `false` for a fresh store and `true` when all four records are
/// present. A store holding only some of the records is corrupted (an
/// interrupted or tampered enrollment) and fails explicitly.
pub fn is_enrolled(store: &KeyStore) -> Result<bool> {
    let mut present = 0usize;
    for role in KeyRole::ALL {
        if store.contains(role)? {
            present += 1;
        }
    }

    match present {
        0 => Ok(false),
        n if n == KeyRole::ALL.len() => Ok(true),
        n => Err(Error::StorageCorrupted(format!(
            "partial enrollment: {} of {} key records present",
            n,
            KeyRole::ALL.len()
        ))),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PEM_FOOTER, PEM_HEADER};

    #[test]
    fn test_enrollment_persists_all_records() {
        let store = KeyStore::open(None).unwrap();
        assert!(!is_enrolled(&store).unwrap());

        enroll(&store).unwrap();
        assert!(is_enrolled(&store).unwrap());

        // Both portable-text public records are present and PEM-framed
        let publics = store
            .get_many(&[KeyRole::SigningPublic, KeyRole::EncryptionPublic])
            .unwrap();
        for record in publics.values() {
            let pem = record.pem.as_deref().unwrap();
            assert!(!pem.is_empty());
            assert!(pem.starts_with(PEM_HEADER));
            assert!(pem.ends_with(PEM_FOOTER));
        }

        // The two pairs are distinct
        assert_ne!(
            publics[&KeyRole::SigningPublic].der,
            publics[&KeyRole::EncryptionPublic].der
        );

        // Private halves are stored without portable text
        assert!(store.get(KeyRole::SigningPrivate).unwrap().pem.is_none());
        assert!(store.get(KeyRole::EncryptionPrivate).unwrap().pem.is_none());
    }

    #[test]
    fn test_double_enrollment_rejected() {
        let store = KeyStore::open(None).unwrap();
        enroll(&store).unwrap();

        let result = enroll(&store);
        assert!(matches!(result, Err(Error::AlreadyEnrolled)));
    }

    #[test]
    fn test_partial_enrollment_is_corrupted() {
        let store = KeyStore::open(None).unwrap();
        store
            .put(
                KeyRole::SigningPublic,
                &StoredKeyRecord {
                    der: vec![1],
                    pem: Some("pem".into()),
                },
            )
            .unwrap();

        assert!(matches!(
            is_enrolled(&store),
            Err(Error::StorageCorrupted(_))
        ));
    }
}
