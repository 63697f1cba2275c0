use super::{HostCommitment, HostNonce, Signature, SignerCommitment, Variant, Verifier};
use crate::Error;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

/// Host side of a single anti-klepto signing exchange.
///
/// Enforces the ordering the protocol relies on:
/// 1. the host commits to a fresh [HostNonce] ([Ceremony::host_commitment]),
/// 2. the signer commits to its nonce ([Ceremony::receive_signer_commitment]),
/// 3. only then is the host nonce disclosed ([Ceremony::host_nonce]),
/// 4. the returned signature is checked before it is used ([Ceremony::finalize]).
///
/// A ceremony is consumed by [Ceremony::finalize] and must not be reused.
pub struct Ceremony {
    verifier: Verifier,
    host_nonce: HostNonce,
    host_commitment: HostCommitment,
    signer_commitment: Option<SignerCommitment>,
}

impl Ceremony {
    /// Start a ceremony with a fresh host nonce.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, variant: Variant) -> Self {
        Self::with_nonce(variant, HostNonce::random(rng))
    }

    /// Start a ceremony with a caller-provided host nonce.
    pub fn with_nonce(variant: Variant, host_nonce: HostNonce) -> Self {
        let host_commitment = host_nonce.commit(variant);
        debug!(%variant, %host_commitment, "started ceremony");
        Self {
            verifier: Verifier::new(variant),
            host_nonce,
            host_commitment,
            signer_commitment: None,
        }
    }

    /// The protocol variant the signer is expected to speak.
    pub fn variant(&self) -> Variant {
        self.verifier.variant()
    }

    /// The commitment to send to the signer before it picks its nonce.
    pub fn host_commitment(&self) -> &HostCommitment {
        &self.host_commitment
    }

    /// Record the signer's nonce commitment.
    ///
    /// May only be called once per ceremony.
    pub fn receive_signer_commitment(&mut self, bytes: &[u8]) -> Result<&SignerCommitment, Error> {
        if self.signer_commitment.is_some() {
            return Err(Error::UnexpectedState("signer commitment already received"));
        }
        let commitment = SignerCommitment::decode(bytes, self.variant()).inspect_err(|err| {
            warn!(?err, "rejected signer commitment");
        })?;
        debug!(%commitment, "received signer commitment");
        Ok(self.signer_commitment.insert(commitment))
    }

    /// The signer commitment, once received.
    pub fn signer_commitment(&self) -> Option<&SignerCommitment> {
        self.signer_commitment.as_ref()
    }

    /// The host nonce to disclose to the signer.
    ///
    /// Refuses to disclose the nonce before the signer has committed to its own.
    pub fn host_nonce(&self) -> Result<&HostNonce, Error> {
        if self.signer_commitment.is_none() {
            return Err(Error::UnexpectedState(
                "host nonce requested before signer commitment",
            ));
        }
        Ok(&self.host_nonce)
    }

    /// Verify the signature returned by the signer.
    ///
    /// Returns the parsed signature only if its nonce incorporates the host nonce.
    pub fn finalize(self, signature: &[u8]) -> Result<Signature, Error> {
        let Some(commitment) = &self.signer_commitment else {
            return Err(Error::UnexpectedState(
                "signature received before signer commitment",
            ));
        };
        let signature = Signature::try_from(signature)?;
        match self.verifier.verify(&self.host_nonce, commitment, &signature) {
            Ok(()) => {
                debug!(%signature, "verified signature");
                Ok(signature)
            }
            Err(err) => {
                warn!(?err, %commitment, %signature, "signer did not use host nonce");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antiklepto::mocks::Signer;
    use rand::{rngs::StdRng, SeedableRng};

    const MESSAGE: [u8; 32] = [0x42; 32];

    fn run(variant: Variant, signer: &mut Signer, rng: &mut StdRng) -> Result<Signature, Error> {
        let mut ceremony = Ceremony::new(rng, variant);
        let signer_commitment = signer.commit(rng, ceremony.host_commitment())?;
        ceremony.receive_signer_commitment(&signer_commitment)?;
        let signature = signer.sign(ceremony.host_nonce()?, &MESSAGE)?;
        ceremony.finalize(&signature)
    }

    #[test]
    fn test_honest_signer() {
        let mut rng = StdRng::seed_from_u64(0);
        for variant in [Variant::Tagged, Variant::Legacy] {
            let mut signer = Signer::new(&mut rng, variant);
            for _ in 0..8 {
                run(variant, &mut signer, &mut rng).unwrap();
            }
        }
    }

    #[test]
    fn test_dishonest_signer() {
        let mut rng = StdRng::seed_from_u64(1);
        for variant in [Variant::Tagged, Variant::Legacy] {
            let mut signer = Signer::dishonest(&mut rng, variant);
            assert_eq!(
                run(variant, &mut signer, &mut rng),
                Err(Error::NonceVerificationFailed)
            );
        }
    }

    #[test]
    fn test_variant_mismatch() {
        let mut rng = StdRng::seed_from_u64(2);

        // A legacy signer answers a tagged host
        let mut signer = Signer::new(&mut rng, Variant::Legacy);
        let mut ceremony = Ceremony::new(&mut rng, Variant::Tagged);
        let signer_commitment = signer.commit(&mut rng, ceremony.host_commitment()).unwrap();
        assert_eq!(
            ceremony.receive_signer_commitment(&signer_commitment),
            Err(Error::InvalidPointEncoding)
        );
        assert!(ceremony.signer_commitment().is_none());
    }

    #[test]
    fn test_nonce_withheld_until_commitment() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut signer = Signer::new(&mut rng, Variant::Tagged);
        let mut ceremony = Ceremony::new(&mut rng, Variant::Tagged);
        assert!(matches!(
            ceremony.host_nonce(),
            Err(Error::UnexpectedState(_))
        ));

        let signer_commitment = signer.commit(&mut rng, ceremony.host_commitment()).unwrap();
        ceremony
            .receive_signer_commitment(&signer_commitment)
            .unwrap();
        assert_eq!(
            ceremony.signer_commitment().map(|c| c.as_ref()),
            Some(signer_commitment.as_slice())
        );
        assert_eq!(
            ceremony.host_nonce().unwrap().commit(Variant::Tagged),
            *ceremony.host_commitment()
        );

        // A second commitment cannot replace the first
        assert!(matches!(
            ceremony.receive_signer_commitment(&signer_commitment),
            Err(Error::UnexpectedState(_))
        ));
    }

    #[test]
    fn test_finalize_without_commitment() {
        let mut rng = StdRng::seed_from_u64(4);
        let ceremony = Ceremony::new(&mut rng, Variant::Legacy);
        assert!(matches!(
            ceremony.finalize(&[0u8; 64]),
            Err(Error::UnexpectedState(_))
        ));
    }

    #[test]
    fn test_finalize_invalid_length() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut signer = Signer::new(&mut rng, Variant::Tagged);
        let mut ceremony = Ceremony::new(&mut rng, Variant::Tagged);
        let signer_commitment = signer.commit(&mut rng, ceremony.host_commitment()).unwrap();
        ceremony
            .receive_signer_commitment(&signer_commitment)
            .unwrap();
        assert_eq!(
            ceremony.finalize(&[0u8; 63]),
            Err(Error::InvalidInputLength {
                expected: 64,
                actual: 63
            })
        );
    }

    #[test]
    fn test_fixed_nonce() {
        let nonce = HostNonce::from([0x55; 32]);
        let ceremony = Ceremony::with_nonce(Variant::Tagged, nonce.clone());
        assert_eq!(ceremony.variant(), Variant::Tagged);
        assert_eq!(*ceremony.host_commitment(), nonce.commit(Variant::Tagged));
    }
}
