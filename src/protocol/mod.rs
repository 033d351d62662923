//! # Protocol Module
//!
//! The challenge-response protocol client: registration, challenge
//! acquisition, and challenge-response submission.
//!
//! ## Server Endpoints
//!
//! All endpoints are relative to a caller-supplied origin, take JSON bodies,
//! and are invoked with `POST`:
//!
//! | Endpoint | Request | Response | Non-2xx |
//! |----------|---------|----------|---------|
//! | `/register` | `{username, sign_key, enc_key}` | `{success}` | soft failure (`false`) |
//! | `/get_challenge` | `{username}` | `{challenge}` | `ChallengeRequestFailed` |
//! | `/verify_challenge` | `{username, challengeResponse}` | `{success}` | soft failure (`false`) |
//!
//! ## Failure Shapes
//!
//! Each flow distinguishes three outcomes so callers can react differently:
//! a local error (missing keys, signing failure — abort and surface), a hard
//! protocol error (challenge fetch failed — retry the whole flow), and a soft
//! `false` outcome (the server rejected registration or the signed challenge
//! — tell the user). No case is dropped to a log line only.

mod client;
pub mod wire;

pub use client::AuthClient;
