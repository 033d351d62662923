//! # Keygate Core
//!
//! A passwordless authentication client core: instead of a password, an
//! installation holds two RSA key pairs, registers the public halves with a
//! server, and logs in by signing server-issued random challenges with the
//! stored signing private key.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KEYGATE CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │ Enrollment  │  │   Signer    │  │  Protocol   │  │    Codec     │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Generate  │  │ - Load key  │  │ - Register  │  │ - base64     │   │
//! │  │ - Export    │  │ - PSS sign  │  │ - Challenge │  │ - PEM        │   │
//! │  │ - Persist   │  │             │  │ - Submit    │  │              │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘   │
//! │         │                │                │                │           │
//! │         └────────────────┴───────┬────────┴────────────────┘           │
//! │                                  │                                      │
//! │  ┌─────────────────┐   ┌─────────┴─────────┐                           │
//! │  │     Crypto      │   │      Storage      │                           │
//! │  │                 │   │                   │                           │
//! │  │ - RSA-4096      │   │ - SQLite KeyStore │                           │
//! │  │ - PSS / OAEP    │   │ - Write-once      │                           │
//! │  │ - SHA-512       │   │ - Role-keyed      │                           │
//! │  └─────────────────┘   └───────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`codec`] - base64 and PEM wire-format transforms
//! - [`crypto`] - RSA primitives (key pairs, PSS signatures, OAEP)
//! - [`storage`] - Durable key store (SQLite, write-once records)
//! - [`enrollment`] - Install-time key generation and persistence
//! - [`signer`] - Challenge signing with the stored private key
//! - [`protocol`] - The register / get-challenge / verify-challenge client
//!
//! ## Typical Flow
//!
//! ```ignore
//! use std::sync::Arc;
//! use keygate_core::{enrollment, AuthClient, KeyStore};
//!
//! let store = Arc::new(KeyStore::open(Some("keygate.db"))?);
//! if !enrollment::is_enrolled(&store)? {
//!     enrollment::enroll(&store)?;
//! }
//!
//! let client = AuthClient::new(Arc::clone(&store))?;
//! client.register("alice", "https://example.com").await?;
//! let logged_in = client.login("alice", "https://example.com").await?;
//! ```
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY LAYERS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Key Provenance                                                        │
//! │  ──────────────                                                         │
//! │  Both pairs are generated locally with OS randomness; private halves   │
//! │  never leave the key store, and records are write-once.                │
//! │                                                                         │
//! │  Challenge Freshness                                                   │
//! │  ───────────────────                                                    │
//! │  The server issues random per-attempt challenges and owns their        │
//! │  uniqueness and expiry; the client treats them as opaque bytes.        │
//! │                                                                         │
//! │  Signature Parameters                                                  │
//! │  ────────────────────                                                   │
//! │  RSA-PSS over SHA-512 with a pinned 446-byte salt. The parameter is    │
//! │  a wire contract: signer and verifier must match exactly.              │
//! │                                                                         │
//! │  Transport security (TLS) is the channel's job, not this library's.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod codec;
pub mod crypto;
pub mod enrollment;
pub mod error;
pub mod protocol;
pub mod signer;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_util;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{EncryptionKeyPair, SigningKeyPair};
pub use error::{Error, Result};
pub use protocol::AuthClient;
pub use signer::ChallengeSigner;
pub use storage::{KeyRole, KeyStore, StoredKeyRecord};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Keygate Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
