use super::{HostNonce, Signature, SignerCommitment, Variant};
use crate::{
    secp256k1::{Point, Scalar, SCALAR_LENGTH},
    Error, Hasher,
};

/// Derive the scalar `t = H(C || host_nonce)` the signer must add to its private nonce.
///
/// `C` is the compressed serialization of the signer commitment and `H` is tagged with
/// [super::POINT_TAG] when `variant` calls for it.
pub fn tweak(variant: Variant, commitment: &SignerCommitment, host_nonce: &HostNonce) -> Scalar {
    let mut hasher = variant.point_hasher();
    hasher.update(&commitment.compressed());
    hasher.update(host_nonce.as_ref());
    let digest: [u8; SCALAR_LENGTH] = hasher.finalize().into();
    Scalar::reduce(&digest)
}

/// Checks that signatures were produced with a nonce tweaked by the host nonce.
///
/// The verifier is stateless and can be shared freely across threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verifier {
    variant: Variant,
}

impl Verifier {
    /// Create a verifier for signers speaking `variant`.
    pub const fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// The protocol variant this verifier checks.
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Compute the `r` a compliant signer must produce: `(t*G + R1).x mod n`.
    ///
    /// Fails with [Error::NonceVerificationFailed] if the expected nonce point is the
    /// point at infinity (no signature can match it).
    pub fn expected_r(
        &self,
        host_nonce: &HostNonce,
        commitment: &SignerCommitment,
    ) -> Result<[u8; SCALAR_LENGTH], Error> {
        let tweak = tweak(self.variant, commitment, host_nonce);
        let nonce_point = match Point::mul_base(&tweak) {
            Some(tweak_point) => tweak_point.add(commitment.point()),
            None => Some(*commitment.point()),
        };
        let nonce_point = nonce_point.ok_or(Error::NonceVerificationFailed)?;
        Ok(nonce_point.x_mod_order())
    }

    /// Verify that `signature` was produced with the nonce `k1 + t`, where `k1*G` is the
    /// signer commitment and `t` is derived from the host nonce.
    ///
    /// Only the `r` component of the signature is checked.
    pub fn verify(
        &self,
        host_nonce: &HostNonce,
        commitment: &SignerCommitment,
        signature: &Signature,
    ) -> Result<(), Error> {
        let expected = self.expected_r(host_nonce, commitment)?;
        if signature.r() != expected {
            return Err(Error::NonceVerificationFailed);
        }
        Ok(())
    }
}

/// Verify that the signer incorporated `host_nonce` into the nonce used for `signature`.
///
/// Inputs are checked before any curve arithmetic, in order: `host_nonce` must be 32 bytes
/// and `signature` 64 bytes (else [Error::InvalidInputLength]), and `signer_commitment`
/// must be a valid point in the encoding required by `variant` (else
/// [Error::InvalidPointEncoding]). If all inputs are well-formed but the nonce does not
/// match, [Error::NonceVerificationFailed] is returned and the signature must not be used.
pub fn verify(
    variant: Variant,
    host_nonce: &[u8],
    signer_commitment: &[u8],
    signature: &[u8],
) -> Result<(), Error> {
    let host_nonce = HostNonce::try_from(host_nonce)?;
    let signature = Signature::try_from(signature)?;
    let signer_commitment = SignerCommitment::decode(signer_commitment, variant)?;
    Verifier::new(variant).verify(&host_nonce, &signer_commitment, &signature)
}
