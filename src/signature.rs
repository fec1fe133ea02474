//! Placeholder signature payloads for federated auth options.
//!
//! The wire field normally carries an HMAC-SHA-256 over the server nonce.
//! This module only produces 32 random bytes of the right size and entropy;
//! callers that need a cryptographically meaningful signature compute it
//! themselves and pass it through the same field.

use rand::{CryptoRng, RngCore};

use crate::wire_protocol::fed_auth::SIGNATURE_LEN;

/// Fill a signature from the injected generator. Taking the rng as a
/// parameter keeps tests deterministic with a seeded `StdRng`.
pub fn random_signature<R: CryptoRng + RngCore>(rng: &mut R) -> [u8; SIGNATURE_LEN] {
    let mut signature = [0u8; SIGNATURE_LEN];
    rng.fill_bytes(&mut signature);
    signature
}

/// Generate a signature from a CSPRNG scoped to this call.
pub fn generate() -> [u8; SIGNATURE_LEN] {
    random_signature(&mut rand::rng())
}
