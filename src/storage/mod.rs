//! # Storage Module
//!
//! Durable local storage for the installation's key material.
//!
//! ## Storage Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         STORAGE SYSTEM                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │   Application   │  enrollment writes, signer + protocol read        │
//! │  └────────┬────────┘                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ┌─────────────────┐                                                   │
//! │  │    KeyStore     │  Role-keyed records: DER interchange blob         │
//! │  │                 │  plus PEM portable text for public halves         │
//! │  └────────┬────────┘                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ┌─────────────────┐                                                   │
//! │  │   SQLite DB     │  In-memory for tests, file for production;        │
//! │  │                 │  lifecycle independent of any single request      │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod key_store;
mod schema;

pub use key_store::{KeyRole, KeyStore, StoredKeyRecord};
