//! # Key Store
//!
//! Durable, process-wide persistence for the installation's key material.
//!
//! ## Storage Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY STORE                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  role                  │ der (interchange)  │ pem (portable text)       │
//! │  ──────────────────────┼────────────────────┼────────────────────       │
//! │  signing.public        │ SPKI DER           │ PEM                       │
//! │  signing.private       │ PKCS#8 DER         │ —                         │
//! │  encryption.public     │ SPKI DER           │ PEM                       │
//! │  encryption.private    │ PKCS#8 DER         │ —                         │
//! │                                                                         │
//! │  Six persisted artifacts across four rows. Written once at             │
//! │  enrollment, read-only afterwards; the store rejects overwrites.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups fail explicitly: an absent role is `KeyNotFound` (the
//! installation has not enrolled yet), while a public row that lost its
//! portable text is `StorageCorrupted` (the data on disk is unusable and
//! only re-enrollment recovers).

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use super::schema;
use crate::error::{Error, Result};

/// Role of a stored key record
///
/// Identifies which half of which pair a record holds. The string form is
/// the storage primary key and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Public half of the signing pair
    SigningPublic,
    /// Private half of the signing pair
    SigningPrivate,
    /// Public half of the encryption pair
    EncryptionPublic,
    /// Private half of the encryption pair
    EncryptionPrivate,
}

impl KeyRole {
    /// All roles, in enrollment order
    pub const ALL: [KeyRole; 4] = [
        KeyRole::SigningPublic,
        KeyRole::SigningPrivate,
        KeyRole::EncryptionPublic,
        KeyRole::EncryptionPrivate,
    ];

    /// Stable string form used as the storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::SigningPublic => "signing.public",
            KeyRole::SigningPrivate => "signing.private",
            KeyRole::EncryptionPublic => "encryption.public",
            KeyRole::EncryptionPrivate => "encryption.private",
        }
    }

    /// Whether this role is a public half (and therefore carries PEM text)
    pub fn is_public(&self) -> bool {
        matches!(self, KeyRole::SigningPublic | KeyRole::EncryptionPublic)
    }
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted projection of one key half
///
/// `der` is the machine-importable interchange form (PKCS#8 for private
/// halves, SPKI for public halves). `pem` is the portable text form,
/// present for public halves only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKeyRecord {
    /// Interchange-format blob
    pub der: Vec<u8>,
    /// Portable text form (public halves only)
    pub pem: Option<String>,
}

/// The durable key store
///
/// Wraps a SQLite connection; records survive process restarts when opened
/// with a file path. Concurrent reads need no coordination because records
/// are write-once.
pub struct KeyStore {
    conn: Mutex<Connection>,
}

impl KeyStore {
    /// Open or create a key store
    ///
    /// If `path` is `None`, creates an in-memory store (useful for testing;
    /// an in-memory store is not durable).
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)
                .map_err(|e| Error::DatabaseError(format!("Failed to open key store: {}", e)))?,
            None => Connection::open_in_memory().map_err(|e| {
                Error::DatabaseError(format!("Failed to create in-memory key store: {}", e))
            })?,
        };

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Initialize the store schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        let version: Option<i32> = conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .ok();

        match version {
            None => {
                conn.execute_batch(schema::CREATE_TABLES)
                    .map_err(|e| Error::DatabaseError(format!("Failed to create tables: {}", e)))?;

                conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?)",
                    params![schema::SCHEMA_VERSION],
                )
                .map_err(|e| {
                    Error::DatabaseError(format!("Failed to set schema version: {}", e))
                })?;

                tracing::info!("Key store schema created (version {})", schema::SCHEMA_VERSION);
            }
            Some(v) if v > schema::SCHEMA_VERSION => {
                return Err(Error::StorageCorrupted(format!(
                    "key store schema version {} is newer than supported {}",
                    v,
                    schema::SCHEMA_VERSION
                )));
            }
            Some(v) => {
                tracing::debug!("Key store schema version: {}", v);
            }
        }

        Ok(())
    }

    /// Persist a key record
    ///
    /// Records are write-once: putting a role that already exists fails
    /// with `StorageWriteError` rather than overwriting the installation's
    /// identity.
    pub fn put(&self, role: KeyRole, record: &StoredKeyRecord) -> Result<()> {
        let conn = self.conn.lock();

        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM key_records WHERE role = ?",
            params![role.as_str()],
            |row| row.get(0),
        )?;
        if exists > 0 {
            return Err(Error::StorageWriteError(format!(
                "key record '{}' already exists (records are write-once)",
                role
            )));
        }

        conn.execute(
            "INSERT INTO key_records (role, der, pem, created_at) VALUES (?, ?, ?, ?)",
            params![role.as_str(), record.der, record.pem, now_timestamp()],
        )?;

        tracing::debug!("Persisted key record '{}'", role);
        Ok(())
    }

    /// Fetch a single key record
    ///
    /// ## Errors
    ///
    /// - `KeyNotFound` if the role has no record (not yet enrolled)
    /// - `StorageCorrupted` if a public record lost its portable text
    pub fn get(&self, role: KeyRole) -> Result<StoredKeyRecord> {
        let conn = self.conn.lock();
        Self::get_locked(&conn, role)
    }

    /// Fetch several key records at once
    ///
    /// Fails with `KeysNotFound` listing every absent role if any requested
    /// record is missing; never returns a partial mapping.
    pub fn get_many(&self, roles: &[KeyRole]) -> Result<HashMap<KeyRole, StoredKeyRecord>> {
        let conn = self.conn.lock();

        let mut found = HashMap::with_capacity(roles.len());
        let mut missing = Vec::new();

        for &role in roles {
            match Self::get_locked(&conn, role) {
                Ok(record) => {
                    found.insert(role, record);
                }
                Err(Error::KeyNotFound(_)) => missing.push(role.as_str()),
                Err(e) => return Err(e),
            }
        }

        if !missing.is_empty() {
            return Err(Error::KeysNotFound(missing.join(", ")));
        }

        Ok(found)
    }

    /// Check whether a role has a record
    pub fn contains(&self, role: KeyRole) -> Result<bool> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM key_records WHERE role = ?",
            params![role.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get_locked(conn: &Connection, role: KeyRole) -> Result<StoredKeyRecord> {
        let row: Option<(Vec<u8>, Option<String>)> = conn
            .query_row(
                "SELECT der, pem FROM key_records WHERE role = ?",
                params![role.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (der, pem) = row.ok_or_else(|| Error::KeyNotFound(role.as_str().to_string()))?;

        if der.is_empty() {
            return Err(Error::StorageCorrupted(format!(
                "key record '{}' has an empty interchange blob",
                role
            )));
        }
        if role.is_public() && pem.is_none() {
            return Err(Error::StorageCorrupted(format!(
                "public key record '{}' is missing its portable text form",
                role
            )));
        }

        Ok(StoredKeyRecord { der, pem })
    }
}

/// Current Unix timestamp in seconds
fn now_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(der: &[u8], pem: Option<&str>) -> StoredKeyRecord {
        StoredKeyRecord {
            der: der.to_vec(),
            pem: pem.map(String::from),
        }
    }

    #[test]
    fn test_put_get_round_trip() {
        let store = KeyStore::open(None).unwrap();

        store
            .put(KeyRole::SigningPublic, &record(b"der-bytes", Some("pem-text")))
            .unwrap();

        let fetched = store.get(KeyRole::SigningPublic).unwrap();
        assert_eq!(fetched.der, b"der-bytes");
        assert_eq!(fetched.pem.as_deref(), Some("pem-text"));
    }

    #[test]
    fn test_get_absent_role_fails_explicitly() {
        let store = KeyStore::open(None).unwrap();
        let result = store.get(KeyRole::SigningPrivate);
        assert!(matches!(result, Err(Error::KeyNotFound(_))));
    }

    #[test]
    fn test_records_are_write_once() {
        let store = KeyStore::open(None).unwrap();

        store
            .put(KeyRole::SigningPrivate, &record(b"first", None))
            .unwrap();
        let result = store.put(KeyRole::SigningPrivate, &record(b"second", None));
        assert!(matches!(result, Err(Error::StorageWriteError(_))));

        // The original record is untouched
        assert_eq!(store.get(KeyRole::SigningPrivate).unwrap().der, b"first");
    }

    #[test]
    fn test_get_many_fails_listing_missing_roles() {
        let store = KeyStore::open(None).unwrap();
        store
            .put(KeyRole::SigningPublic, &record(b"der", Some("pem")))
            .unwrap();

        let result = store.get_many(&[KeyRole::SigningPublic, KeyRole::EncryptionPublic]);
        match result {
            Err(Error::KeysNotFound(missing)) => {
                assert!(missing.contains("encryption.public"));
                assert!(!missing.contains("signing.public"));
            }
            other => panic!("expected KeysNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_get_many_returns_all_requested() {
        let store = KeyStore::open(None).unwrap();
        store
            .put(KeyRole::SigningPublic, &record(b"a", Some("pa")))
            .unwrap();
        store
            .put(KeyRole::EncryptionPublic, &record(b"b", Some("pb")))
            .unwrap();

        let records = store
            .get_many(&[KeyRole::SigningPublic, KeyRole::EncryptionPublic])
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[&KeyRole::EncryptionPublic].der, b"b");
    }

    #[test]
    fn test_public_record_without_pem_is_corrupted() {
        let store = KeyStore::open(None).unwrap();
        store.put(KeyRole::SigningPublic, &record(b"der", None)).unwrap();

        let result = store.get(KeyRole::SigningPublic);
        assert!(matches!(result, Err(Error::StorageCorrupted(_))));
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.db");
        let path = path.to_str().unwrap();

        {
            let store = KeyStore::open(Some(path)).unwrap();
            store
                .put(KeyRole::SigningPrivate, &record(b"durable", None))
                .unwrap();
        }

        let reopened = KeyStore::open(Some(path)).unwrap();
        assert_eq!(reopened.get(KeyRole::SigningPrivate).unwrap().der, b"durable");
    }
}
