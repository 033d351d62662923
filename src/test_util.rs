//! Shared test fixtures.
//!
//! RSA-4096 generation is expensive, so tests that only need *a* key pair
//! (rather than a fresh one) share these lazily-generated fixtures.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::codec;
use crate::crypto::{EncryptionKeyPair, SigningKeyPair};
use crate::storage::{KeyRole, KeyStore, StoredKeyRecord};

/// Shared signing pair, generated once per test binary
pub(crate) static SIGNING_PAIR: Lazy<SigningKeyPair> =
    Lazy::new(|| SigningKeyPair::generate().expect("fixture signing pair"));

/// Shared encryption pair, generated once per test binary
pub(crate) static ENCRYPTION_PAIR: Lazy<EncryptionKeyPair> =
    Lazy::new(|| EncryptionKeyPair::generate().expect("fixture encryption pair"));

/// Build a fully-enrolled in-memory store from the shared fixtures
pub(crate) fn enrolled_store() -> Arc<KeyStore> {
    let store = KeyStore::open(None).expect("in-memory store");

    let signing_public = SIGNING_PAIR.public_key_der().unwrap();
    store
        .put(
            KeyRole::SigningPublic,
            &StoredKeyRecord {
                pem: Some(codec::public_key_to_pem(&signing_public)),
                der: signing_public,
            },
        )
        .unwrap();
    store
        .put(
            KeyRole::SigningPrivate,
            &StoredKeyRecord {
                der: SIGNING_PAIR.private_key_der().unwrap().to_vec(),
                pem: None,
            },
        )
        .unwrap();

    let encryption_public = ENCRYPTION_PAIR.public_key_der().unwrap();
    store
        .put(
            KeyRole::EncryptionPublic,
            &StoredKeyRecord {
                pem: Some(codec::public_key_to_pem(&encryption_public)),
                der: encryption_public,
            },
        )
        .unwrap();
    store
        .put(
            KeyRole::EncryptionPrivate,
            &StoredKeyRecord {
                der: ENCRYPTION_PAIR.private_key_der().unwrap().to_vec(),
                pem: None,
            },
        )
        .unwrap();

    Arc::new(store)
}
