//! Payment token generator.
//!
//! The token is the hex form of a digest over random bytes. The digest only
//! shapes the output into a fixed-width key; it is not a security measure and
//! collisions between tokens remain possible.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length in characters of a payment token.
pub const PAYMENT_TOKEN_LEN: usize = 32;

/// Generate a 32 character lowercase hex token from 32 random bytes.
pub fn generate_payment_token<R: Rng>(rng: &mut R) -> String {
    let mut seed = [0u8; 32];
    rng.fill(&mut seed);
    let digest = Sha256::digest(seed);
    hex::encode(&digest[..PAYMENT_TOKEN_LEN / 2])
}
