//! # Wire Types
//!
//! JSON request/response bodies for the three server endpoints. Field names
//! are part of the server contract and must not change.

use serde::{Deserialize, Serialize};

/// Path of the registration endpoint
pub const REGISTER_PATH: &str = "/register";

/// Path of the challenge-issuing endpoint
pub const GET_CHALLENGE_PATH: &str = "/get_challenge";

/// Path of the challenge-verification endpoint
pub const VERIFY_CHALLENGE_PATH: &str = "/verify_challenge";

/// Body of `POST /register`
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    /// Username to register the keys under
    pub username: &'a str,
    /// Signing public key, PEM portable text
    pub sign_key: &'a str,
    /// Encryption public key, PEM portable text
    pub enc_key: &'a str,
}

/// Body of `POST /get_challenge`
#[derive(Debug, Serialize)]
pub struct ChallengeRequest<'a> {
    /// Username requesting a login challenge
    pub username: &'a str,
}

/// Response body of `POST /get_challenge`
#[derive(Debug, Deserialize)]
pub struct ChallengeReply {
    /// Challenge bytes, base64-encoded
    pub challenge: String,
}

/// Body of `POST /verify_challenge`
#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    /// Username the challenge was issued for
    pub username: &'a str,
    /// Signature over the challenge bytes, base64-encoded
    #[serde(rename = "challengeResponse")]
    pub challenge_response: &'a str,
}

/// Success indicator returned by `/register` and `/verify_challenge`
#[derive(Debug, Deserialize)]
pub struct OutcomeReply {
    /// Whether the server accepted the request
    pub success: bool,
}
