//! # Error Handling
//!
//! This module provides the error types for Keygate Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Lifecycle Errors                                              │
//! │  │   ├── KeyGenerationFailed   - RSA key generation failed             │
//! │  │   └── AlreadyEnrolled       - Installation keys already exist       │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── InvalidKey            - Key import/format failure             │
//! │  │   ├── SigningFailed         - PSS signing operation failed          │
//! │  │   ├── VerificationFailed    - Signature verification failed         │
//! │  │   ├── EncryptionFailed      - OAEP encryption failed                │
//! │  │   └── DecryptionFailed      - OAEP decryption failed                │
//! │  │                                                                      │
//! │  ├── Storage Errors                                                    │
//! │  │   ├── KeyNotFound           - One requested key record absent       │
//! │  │   ├── KeysNotFound          - Required key records absent           │
//! │  │   ├── StorageReadError      - Failed to read from the store         │
//! │  │   ├── StorageWriteError     - Failed to write to the store          │
//! │  │   ├── StorageCorrupted      - Record present but unusable           │
//! │  │   └── DatabaseError         - Underlying SQLite error               │
//! │  │                                                                      │
//! │  ├── Codec Errors                                                      │
//! │  │   └── DecodeFailed          - base64/PEM decoding failed            │
//! │  │                                                                      │
//! │  └── Protocol Errors                                                   │
//! │      ├── ChallengeRequestFailed - Challenge fetch failed               │
//! │      └── SerializationError     - JSON body (de)serialization failed   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Server rejections of a registration or a signed challenge are deliberately
//! NOT errors: those outcomes come back as `Ok(false)` from the protocol
//! client, because "try again" and "tell the user" are the only follow-ups
//! either way. Errors are reserved for conditions that abort the current flow.

use thiserror::Error;

/// Result type alias for Keygate Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Keygate Core
///
/// All errors are categorized by module/domain to make error handling
/// clearer and to provide meaningful error messages to users.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Key Lifecycle Errors (100-199)
    // ========================================================================

    /// RSA key-pair generation failed
    ///
    /// Fatal at enrollment time: there is no degraded mode without a
    /// signing identity.
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Installation key records already exist
    #[error("This installation is already enrolled. Key records are write-once.")]
    AlreadyEnrolled,

    // ========================================================================
    // Crypto Errors (200-299)
    // ========================================================================

    /// Invalid key format or failed key import
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    VerificationFailed,

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    // ========================================================================
    // Storage Errors (300-399)
    // ========================================================================

    /// A single requested key record is absent from the store
    #[error("Key record not found: {0}")]
    KeyNotFound(String),

    /// One or more required key records are absent from the store
    ///
    /// Raised before any network I/O when a flow needs several records at
    /// once (e.g. registration needs both public keys).
    #[error("Key records not found: {0}")]
    KeysNotFound(String),

    /// Failed to read from the key store
    #[error("Failed to read from storage: {0}")]
    StorageReadError(String),

    /// Failed to write to the key store
    #[error("Failed to write to storage: {0}")]
    StorageWriteError(String),

    /// A record exists but is unusable (e.g. a public record without its
    /// portable-text form) — distinguishes corruption from "not initialized"
    #[error("Storage corrupted: {0}")]
    StorageCorrupted(String),

    /// Underlying database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    // ========================================================================
    // Codec Errors (400-499)
    // ========================================================================

    /// base64 or PEM decoding failed
    #[error("Decoding failed: {0}")]
    DecodeFailed(String),

    // ========================================================================
    // Protocol Errors (500-599)
    // ========================================================================

    /// Challenge acquisition failed (transport failure or non-success status)
    ///
    /// Fatal to the current login attempt; retrying the whole flow is safe
    /// because the abandoned challenge holds no client-side state.
    #[error("Challenge request failed: {0}")]
    ChallengeRequestFailed(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Key lifecycle
    /// - 200-299: Crypto
    /// - 300-399: Storage
    /// - 400-499: Codec
    /// - 500-599: Protocol
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Key lifecycle (100-199)
            Error::KeyGenerationFailed(_) => 100,
            Error::AlreadyEnrolled => 101,

            // Crypto (200-299)
            Error::InvalidKey(_) => 200,
            Error::SigningFailed(_) => 201,
            Error::VerificationFailed => 202,
            Error::EncryptionFailed(_) => 203,
            Error::DecryptionFailed(_) => 204,

            // Storage (300-399)
            Error::KeyNotFound(_) => 300,
            Error::KeysNotFound(_) => 301,
            Error::StorageReadError(_) => 302,
            Error::StorageWriteError(_) => 303,
            Error::StorageCorrupted(_) => 304,
            Error::DatabaseError(_) => 305,

            // Codec (400-499)
            Error::DecodeFailed(_) => 400,

            // Protocol (500-599)
            Error::ChallengeRequestFailed(_) => 500,
            Error::SerializationError(_) => 501,

            // Internal (900-999)
            Error::Internal(_) => 900,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors can potentially be resolved by retrying the whole
    /// flow. Missing or corrupted key records are not recoverable without
    /// re-enrollment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ChallengeRequestFailed(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::DecodeFailed(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
