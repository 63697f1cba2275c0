//! A mock signing device for exercising the host side of the protocol.

use super::{tweak, HostCommitment, HostNonce, Signature, SignerCommitment, Variant};
use crate::{
    secp256k1::{Point, Scalar, SCALAR_LENGTH},
    Error,
};
use k256::elliptic_curve::scalar::IsHigh;
use rand::{CryptoRng, RngCore};

/// A signer that follows the anti-klepto protocol (or, if dishonest, pretends to).
///
/// Signatures are plain ECDSA over the provided 32-byte message digest with low-s
/// normalization.
pub struct Signer {
    variant: Variant,
    key: Scalar,
    public_key: Point,
    honest: bool,
    pending: Option<(Scalar, HostCommitment)>,
}

impl Signer {
    /// Create a signer with a random key that tweaks its nonce as required.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, variant: Variant) -> Self {
        Self::with_behavior(rng, variant, true)
    }

    /// Create a signer that commits to its nonce but then ignores the host nonce.
    pub fn dishonest<R: RngCore + CryptoRng>(rng: &mut R, variant: Variant) -> Self {
        Self::with_behavior(rng, variant, false)
    }

    fn with_behavior<R: RngCore + CryptoRng>(rng: &mut R, variant: Variant, honest: bool) -> Self {
        let (key, public_key) = loop {
            let key = Scalar::random(rng);
            if let Some(public_key) = Point::mul_base(&key) {
                break (key, public_key);
            }
        };
        Self {
            variant,
            key,
            public_key,
            honest,
            pending: None,
        }
    }

    /// The key `d*G` signatures verify under.
    pub fn public_key(&self) -> &Point {
        &self.public_key
    }

    /// Pick a private nonce `k1` and return `k1*G` serialized for the signer's variant.
    pub fn commit<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
        host_commitment: &HostCommitment,
    ) -> Result<Vec<u8>, Error> {
        if self.pending.is_some() {
            return Err(Error::UnexpectedState("nonce already committed"));
        }
        let nonce = Scalar::random(rng);
        let point = Point::mul_base(&nonce).ok_or(Error::UnexpectedState("zero nonce"))?;
        self.pending = Some((nonce, *host_commitment));
        Ok(point.encode(self.variant.encoding()))
    }

    /// Sign `message` (a 32-byte digest) using the committed nonce and the revealed host nonce.
    pub fn sign(
        &mut self,
        host_nonce: &HostNonce,
        message: &[u8; SCALAR_LENGTH],
    ) -> Result<Signature, Error> {
        let (nonce, host_commitment) = self
            .pending
            .take()
            .ok_or(Error::UnexpectedState("no nonce committed"))?;
        if host_nonce.commit(self.variant) != host_commitment {
            return Err(Error::UnexpectedState("host nonce does not match commitment"));
        }

        let nonce_point = Point::mul_base(&nonce).ok_or(Error::UnexpectedState("zero nonce"))?;
        let k = if self.honest {
            let commitment = SignerCommitment::from_point(nonce_point, self.variant);
            nonce + tweak(self.variant, &commitment, host_nonce)
        } else {
            nonce
        };
        let r = Point::mul_base(&k)
            .ok_or(Error::UnexpectedState("zero nonce"))?
            .x_mod_order();

        // s = k^-1 * (z + r*d)
        let z = Scalar::reduce(message).0;
        let r_scalar = Scalar::reduce(&r).0;
        let k_inv: Option<k256::Scalar> = k.0.invert().into();
        let k_inv = k_inv.ok_or(Error::UnexpectedState("zero nonce"))?;
        let mut s = k_inv * (z + r_scalar * self.key.0);
        if bool::from(s.is_high()) {
            s = -s;
        }
        Ok(Signature::from_scalars(r, s.to_bytes().into()))
    }
}
