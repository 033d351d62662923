//! # Cryptography Module
//!
//! This module provides all cryptographic primitives used by Keygate Core.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Per installation, two independent RSA-4096 key pairs:                 │
//! │                                                                         │
//! │  ┌─────────────────────┐           ┌─────────────────────┐             │
//! │  │  Signing Pair       │           │  Encryption Pair    │             │
//! │  │  (RSA-PSS)          │           │  (RSA-OAEP)         │             │
//! │  │                     │           │                     │             │
//! │  │ • Prove identity    │           │ • Confidentiality   │             │
//! │  │ • Sign challenges   │           │ • Payload wrapping  │             │
//! │  └─────────────────────┘           └─────────────────────┘             │
//! │                                                                         │
//! │  Shared parameters: 4096-bit modulus, e = 65537, SHA-512 for all       │
//! │  padding and salt derivation. The halves of a pair are generated       │
//! │  together and never mixed across pairs or purposes.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Why Chosen |
//! |-----------|---------|------------|
//! | RSA-PSS (SHA-512) | Challenge signatures | Randomized padding, provable security |
//! | RSA-OAEP (SHA-512) | Encryption | Standard padding for RSA confidentiality |
//! | PKCS#8 / SPKI DER | Key interchange | Machine-importable standard formats |
//!
//! ## Security Considerations
//!
//! 1. **Secure Random**: `rand::rngs::OsRng` for key generation and salts
//! 2. **Private-key hygiene**: exported private DER is wrapped in `Zeroizing`
//! 3. **Parameter exactness**: the PSS salt length is a wire contract — both
//!    signer and verifier must use [`signing::PSS_SALT_LEN`]

mod encryption;
mod keys;
pub mod signing;

pub use encryption::{decrypt, encrypt, MAX_PLAINTEXT_LEN};
pub use keys::{key_fingerprint, public_key_from_spki_der, EncryptionKeyPair, SigningKeyPair};
pub use signing::{sign, verify, PSS_SALT_LEN, SIGNATURE_SIZE};

/// RSA modulus size in bits
pub const MODULUS_BITS: usize = 4096;

/// RSA modulus size in bytes
pub const MODULUS_BYTES: usize = MODULUS_BITS / 8;

/// RSA public exponent (F4)
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Output size of the underlying hash (SHA-512) in bytes
pub const HASH_OUTPUT_BYTES: usize = 64;
