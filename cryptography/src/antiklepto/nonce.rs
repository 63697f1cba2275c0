use super::Variant;
use crate::{sha256::Digest, Error, Hasher};
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a host nonce.
pub const HOST_NONCE_LENGTH: usize = 32;

/// Commitment to a [HostNonce], sent to the signer before it fixes its nonce.
pub type HostCommitment = Digest;

/// Secret randomness contributed by the host to the signer's nonce.
///
/// The nonce must stay private until the signer has committed to its own nonce
/// (see [super::Ceremony]). It is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct HostNonce([u8; HOST_NONCE_LENGTH]);

impl HostNonce {
    /// Draw a fresh host nonce from a cryptographically secure source.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut nonce = [0u8; HOST_NONCE_LENGTH];
        rng.fill_bytes(&mut nonce);
        Self(nonce)
    }

    /// Commit to the nonce as expected by signers speaking `variant`.
    pub fn commit(&self, variant: Variant) -> HostCommitment {
        let mut hasher = variant.data_hasher();
        hasher.update(&self.0);
        hasher.finalize()
    }
}

impl From<[u8; HOST_NONCE_LENGTH]> for HostNonce {
    fn from(value: [u8; HOST_NONCE_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for HostNonce {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; HOST_NONCE_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidInputLength {
                expected: HOST_NONCE_LENGTH,
                actual: value.len(),
            })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for HostNonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for HostNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HostNonce([REDACTED])")
    }
}

/// Commit to `host_nonce` as expected by signers speaking `variant`.
///
/// Fails with [Error::InvalidInputLength] if `host_nonce` is not 32 bytes.
pub fn commit(variant: Variant, host_nonce: &[u8]) -> Result<HostCommitment, Error> {
    let host_nonce = HostNonce::try_from(host_nonce)?;
    Ok(host_nonce.commit(variant))
}
