//! SHA-256 implementation of the `Hasher` trait.
//!
//! This implementation uses the `sha2` crate to generate SHA-256 digests. Domain-separated
//! hashes are built with [Sha256::tagged], which absorbs `SHA-256(label) || SHA-256(label)`
//! before any message data.
//!
//! # Example
//! ```rust
//! use antiklepto_cryptography::{Hasher, Sha256};
//!
//! // Create a tagged SHA-256 hasher
//! let mut hasher = Sha256::tagged(b"s2c/ecdsa/data");
//!
//! // Update the hasher with some messages
//! hasher.update(&[0u8; 32]);
//!
//! // Finalize the hasher to get the digest
//! let digest = hasher.finalize();
//!
//! // Print the digest
//! println!("digest: {:?}", digest);
//! ```

use crate::{Error, Hasher};
use antiklepto_utils::hex;
use sha2::{Digest as _, Sha256 as ISha256};
use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

/// Length of a SHA-256 digest.
pub const DIGEST_LENGTH: usize = 32;

/// Generate a SHA-256 digest from a message.
pub fn hash(message: &[u8]) -> Digest {
    let array: [u8; DIGEST_LENGTH] = ISha256::digest(message).into();
    Digest::from(array)
}

/// SHA-256 hasher.
#[derive(Clone, Debug)]
pub struct Sha256 {
    initial: ISha256,
    hasher: ISha256,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Create a hasher that has already absorbed `tag || tag`, where `tag = SHA-256(label)`.
    ///
    /// The tagged prefix survives [Hasher::finalize] and [Hasher::reset].
    pub fn tagged(label: &[u8]) -> Self {
        let tag = hash(label);
        let mut initial = ISha256::new();
        initial.update(tag);
        initial.update(tag);
        Self {
            hasher: initial.clone(),
            initial,
        }
    }
}

impl Hasher for Sha256 {
    type Digest = Digest;

    fn new() -> Self {
        Self {
            initial: ISha256::new(),
            hasher: ISha256::new(),
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Self::Digest {
        let hasher = std::mem::replace(&mut self.hasher, self.initial.clone());
        let array: [u8; DIGEST_LENGTH] = hasher.finalize().into();
        Self::Digest::from(array)
    }

    fn reset(&mut self) {
        self.hasher = self.initial.clone();
    }
}

/// Digest of a SHA-256 hashing operation.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(value: [u8; DIGEST_LENGTH]) -> Self {
        Self(value)
    }
}

impl From<Digest> for [u8; DIGEST_LENGTH] {
    fn from(value: Digest) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DIGEST_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidInputLength {
                expected: DIGEST_LENGTH,
                actual: value.len(),
            })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Digest {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}
