//! # Key Store Schema
//!
//! SQL schema definitions for the durable key store.
//!
//! ## Schema Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KEY STORE SCHEMA                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────┐       ┌─────────────────────┐                  │
//! │  │    key_records      │       │   schema_version    │                  │
//! │  ├─────────────────────┤       ├─────────────────────┤                  │
//! │  │ role (PK)           │       │ version             │                  │
//! │  │ der                 │       └─────────────────────┘                  │
//! │  │ pem                 │                                                │
//! │  │ created_at          │                                                │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  One row per key role; public rows carry both the DER interchange      │
//! │  blob and the PEM portable text, private rows carry DER only.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL to create all tables
pub const CREATE_TABLES: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Key records table
-- One row per key role; rows are written once at enrollment and never
-- updated afterwards.
CREATE TABLE IF NOT EXISTS key_records (
    -- Stable role name ("signing.public", "encryption.private", ...)
    role TEXT PRIMARY KEY,
    -- Interchange form: PKCS#8 DER (private) or SPKI DER (public)
    der BLOB NOT NULL,
    -- Portable text form (PEM); present for public roles only
    pem TEXT,
    -- Unix timestamp of enrollment
    created_at INTEGER NOT NULL
);
"#;
