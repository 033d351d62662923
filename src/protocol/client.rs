//! # Protocol Client
//!
//! Orchestrates the three server interactions of the passwordless flow.
//!
//! ## Login Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LOGIN FLOW                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   CLIENT                                   SERVER                       │
//! │   ──────                                   ──────                       │
//! │                                                                         │
//! │   POST /get_challenge {username}  ───────►                              │
//! │                                   ◄───────  {challenge: base64}         │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   ChallengeSigner.sign(challenge)                                       │
//! │   (loads signing.private, RSA-PSS/SHA-512, salt 446)                    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   POST /verify_challenge          ───────►  verify with registered      │
//! │     {username, challengeResponse}           public key, same salt       │
//! │                                   ◄───────  {success: bool}             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each attempt is a single terminal pass: the client never retries on its
//! own, and an abandoned flow leaves no client-side state to clean up.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codec;
use crate::error::{Error, Result};
use crate::protocol::wire;
use crate::signer::ChallengeSigner;
use crate::storage::{KeyRole, KeyStore, StoredKeyRecord};

/// Client for the registration and login protocol
///
/// Holds the HTTP connection pool and a handle to the key store. One
/// instance can serve any number of sequential or concurrent flows; the
/// store is read-only after enrollment, so no coordination is needed.
pub struct AuthClient {
    http: reqwest::Client,
    store: Arc<KeyStore>,
}

impl AuthClient {
    /// Create a client over a key store
    ///
    /// No request timeout is configured here: the transport and server own
    /// timeout policy, and callers wanting one can wrap the calls.
    pub fn new(store: Arc<KeyStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, store })
    }

    /// Register this installation's public keys under a username
    ///
    /// Reads both public records from the key store and submits their
    /// portable-text forms to `{origin}/register`.
    ///
    /// ## Returns
    ///
    /// - `Ok(true)` — the server accepted the registration
    /// - `Ok(false)` — transport failure, non-success status, or an explicit
    ///   `success: false` body; expected user-facing outcomes, not defects
    ///
    /// ## Errors
    ///
    /// `KeysNotFound` if either public record is missing — raised before any
    /// network I/O, since registration cannot proceed with a partial
    /// identity.
    pub async fn register(&self, username: &str, origin: &str) -> Result<bool> {
        let mut records = self
            .store
            .get_many(&[KeyRole::SigningPublic, KeyRole::EncryptionPublic])?;
        let sign_key = take_pem(&mut records, KeyRole::SigningPublic)?;
        let enc_key = take_pem(&mut records, KeyRole::EncryptionPublic)?;

        let body = wire::RegisterRequest {
            username,
            sign_key: &sign_key,
            enc_key: &enc_key,
        };

        tracing::debug!(username, "Submitting registration");

        let response = match self
            .http
            .post(endpoint(origin, wire::REGISTER_PATH))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Registration request failed: {}", e);
                return Ok(false);
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Registration rejected with status {}", response.status());
            return Ok(false);
        }

        match response.json::<wire::OutcomeReply>().await {
            Ok(outcome) => Ok(outcome.success),
            Err(e) => {
                tracing::warn!("Malformed registration response: {}", e);
                Ok(false)
            }
        }
    }

    /// Fetch a fresh login challenge for a username
    ///
    /// Returns the raw challenge bytes. The client performs no freshness
    /// checks — challenge uniqueness and expiry are the server's job.
    ///
    /// ## Errors
    ///
    /// `ChallengeRequestFailed` on transport failure or any non-success
    /// status; fatal to the current attempt, safe to retry the whole flow.
    pub async fn request_challenge(&self, username: &str, origin: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(endpoint(origin, wire::GET_CHALLENGE_PATH))
            .json(&wire::ChallengeRequest { username })
            .send()
            .await
            .map_err(|e| Error::ChallengeRequestFailed(format!("transport failure: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ChallengeRequestFailed(format!(
                "server responded with status {}",
                status
            )));
        }

        let reply: wire::ChallengeReply = response
            .json()
            .await
            .map_err(|e| Error::ChallengeRequestFailed(format!("malformed challenge body: {}", e)))?;

        codec::decode_base64(&reply.challenge)
    }

    /// Submit a signed challenge for verification
    ///
    /// ## Returns
    ///
    /// `Ok(true)` iff the server answered with a success status and
    /// `success: true`; every other server-side outcome is `Ok(false)`.
    pub async fn submit_response(
        &self,
        username: &str,
        signed_challenge: &str,
        origin: &str,
    ) -> Result<bool> {
        let body = wire::VerifyRequest {
            username,
            challenge_response: signed_challenge,
        };

        let response = match self
            .http
            .post(endpoint(origin, wire::VERIFY_CHALLENGE_PATH))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Challenge response submission failed: {}", e);
                return Ok(false);
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Challenge response rejected with status {}",
                response.status()
            );
            return Ok(false);
        }

        match response.json::<wire::OutcomeReply>().await {
            Ok(outcome) => Ok(outcome.success),
            Err(e) => {
                tracing::warn!("Malformed verification response: {}", e);
                Ok(false)
            }
        }
    }

    /// Run a complete login attempt: fetch, sign, submit
    ///
    /// The three steps fail independently so callers can tell a server
    /// problem (`ChallengeRequestFailed`) from a local signing problem
    /// (`KeyNotFound`/`SigningFailed`) from rejected credentials
    /// (`Ok(false)`).
    pub async fn login(&self, username: &str, origin: &str) -> Result<bool> {
        let challenge = self.request_challenge(username, origin).await?;
        tracing::debug!(username, bytes = challenge.len(), "Received login challenge");

        let signer = ChallengeSigner::new(Arc::clone(&self.store));
        let signature = signer.sign(&challenge)?;
        let encoded = codec::encode_base64(&signature);

        self.submit_response(username, &encoded, origin).await
    }
}

/// Join an origin and an endpoint path
fn endpoint(origin: &str, path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), path)
}

/// Pull the portable-text form out of a fetched public record
fn take_pem(records: &mut HashMap<KeyRole, StoredKeyRecord>, role: KeyRole) -> Result<String> {
    records
        .remove(&role)
        .and_then(|record| record.pem)
        .ok_or_else(|| {
            Error::StorageCorrupted(format!(
                "public key record '{}' is missing its portable text form",
                role
            ))
        })
}

// ============================================================================
// TESTS
// ============================================================================
