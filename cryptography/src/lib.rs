//! Prove that a signing device mixed host randomness into its ECDSA nonce.
//!
//! A malicious (or compromised) signing device can leak its private key over time by grinding
//! the nonces it uses to produce ECDSA signatures. The anti-klepto (sign-to-contract) protocol
//! implemented here removes that covert channel: the host commits to a random value before the
//! device fixes its nonce, the device commits to its own nonce point, and after signing the host
//! checks (using only public values) that the final nonce was tweaked by its randomness.
//!
//! The curve arithmetic is provided by [k256]. This crate only defines how those primitives are
//! composed (see [secp256k1] for the exact capability set relied upon).
//!
//! # Example
//! ```rust
//! use antiklepto_cryptography::antiklepto::{commit, verify, Variant};
//! use antiklepto_utils::from_hex_formatted;
//!
//! // Commit to a host nonce and send the commitment to the signer
//! let host_nonce = [0u8; 32];
//! let host_commitment = commit(Variant::Tagged, &host_nonce).unwrap();
//!
//! // The signer replies with its nonce commitment (here `1*G`) and, once the host nonce is
//! // disclosed, a signature
//! let signer_commitment = from_hex_formatted(
//!     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
//! )
//! .unwrap();
//! let mut signature = from_hex_formatted(
//!     "dda900aadd57f635b2cec2cd36c71fc40b07478526fd6800e6aa377fa6cd3c73",
//! )
//! .unwrap();
//! signature.extend_from_slice(&[1u8; 32]);
//!
//! // Verify the signer used the host nonce
//! assert!(verify(Variant::Tagged, &host_nonce, &signer_commitment, &signature).is_ok());
//! # let _ = host_commitment;
//! ```
//!
//! # Status
//!
//! `antiklepto-cryptography` is **ALPHA** software and is not yet recommended for production use.
//! Developers should expect breaking changes and occasional instability.

use thiserror::Error;

pub mod antiklepto;
pub mod secp256k1;
pub mod sha256;
pub use sha256::{hash, Sha256};

/// Errors that can occur when committing to or verifying an anti-klepto signature.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An input did not have the byte length required by the protocol.
    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },
    /// The signer commitment is not a valid point in the encoding required by the variant.
    #[error("invalid point encoding")]
    InvalidPointEncoding,
    /// The signature nonce was not derived from the host nonce.
    #[error("could not verify that the host nonce was contributed to the signer nonce")]
    NonceVerificationFailed,
    /// A ceremony step was invoked out of order.
    #[error("unexpected state: {0}")]
    UnexpectedState(&'static str),
}

/// Interface this crate relies on for hashing.
///
/// This trait is required to implement the `Clone` trait because it is often
/// part of a struct that is cloned. Implementations clone the absorbed state,
/// which makes it cheap to reuse a pre-seeded (tagged) prefix.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Digest generated by the hasher.
    type Digest: AsRef<[u8]> + Copy;

    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher to its initial state.
    fn finalize(&mut self) -> Self::Digest;

    /// Reset the hasher to its initial state without generating a hash.
    ///
    /// This function does not need to be called after `finalize`.
    fn reset(&mut self);
}
