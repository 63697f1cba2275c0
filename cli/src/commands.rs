//! Subcommands of the `antiklepto` binary.

use antiklepto_cryptography::{
    antiklepto::{self, HostNonce, Variant},
    Error,
};
use antiklepto_utils::hex;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

pub const NONCE_CMD: &str = "nonce";
pub const COMMIT_CMD: &str = "commit";
pub const VERIFY_CMD: &str = "verify";

/// Exit status when the signer did not use the host nonce.
pub const EXIT_VERIFICATION_FAILED: u8 = 1;

/// Exit status when an input is malformed (matches the status `clap` uses for usage errors).
pub const EXIT_MALFORMED_INPUT: u8 = 2;

/// Draw a fresh host nonce and return it hex-encoded.
pub fn nonce<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let host_nonce = HostNonce::random(rng);
    hex(host_nonce.as_ref())
}

/// Return the hex-encoded commitment to `host_nonce`.
pub fn commit(variant: Variant, host_nonce: &[u8]) -> Result<String, Error> {
    let host_commitment = antiklepto::commit(variant, host_nonce)?;
    debug!(%variant, %host_commitment, "committed to host nonce");
    Ok(host_commitment.to_string())
}

/// Verify a signature and log the outcome.
pub fn verify(
    variant: Variant,
    host_nonce: &[u8],
    signer_commitment: &[u8],
    signature: &[u8],
) -> Result<(), Error> {
    let result = antiklepto::verify(variant, host_nonce, signer_commitment, signature);
    match &result {
        Ok(()) => info!(%variant, "signer used host nonce"),
        Err(Error::NonceVerificationFailed) => {
            warn!(%variant, "signer did not use host nonce")
        }
        Err(err) => warn!(%variant, ?err, "malformed input"),
    }
    result
}

/// Map a failure to the process exit status.
pub fn exit_status(err: &Error) -> u8 {
    match err {
        Error::NonceVerificationFailed => EXIT_VERIFICATION_FAILED,
        _ => EXIT_MALFORMED_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antiklepto_utils::from_hex_formatted;
    use rand::{rngs::StdRng, SeedableRng};

    const SIGNER_COMMITMENT: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const R: &str = "dda900aadd57f635b2cec2cd36c71fc40b07478526fd6800e6aa377fa6cd3c73";

    #[test]
    fn test_nonce() {
        let mut rng = StdRng::seed_from_u64(0);
        let first = nonce(&mut rng);
        let second = nonce(&mut rng);
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert!(from_hex_formatted(&first).is_some());
    }

    #[test]
    fn test_commit() {
        assert_eq!(
            commit(Variant::Tagged, &[0u8; 32]).unwrap(),
            "a80cabf8a3e36acf1b5776b0c620e3d87075f16fcd57ed36e7b151c199e01f19"
        );
        assert_eq!(
            commit(Variant::Legacy, &[0u8; 32]).unwrap(),
            "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925"
        );
        assert_eq!(
            commit(Variant::Tagged, &[0u8; 16]).map_err(|err| exit_status(&err)),
            Err(EXIT_MALFORMED_INPUT)
        );
    }

    #[test]
    fn test_verify_exit_status() {
        let signer_commitment = from_hex_formatted(SIGNER_COMMITMENT).unwrap();
        let mut signature = from_hex_formatted(R).unwrap();
        signature.extend_from_slice(&[0x01; 32]);
        assert_eq!(
            verify(Variant::Tagged, &[0u8; 32], &signer_commitment, &signature),
            Ok(())
        );

        let mut tampered = signature.clone();
        tampered[31] ^= 0xff;
        let err = verify(Variant::Tagged, &[0u8; 32], &signer_commitment, &tampered).unwrap_err();
        assert_eq!(exit_status(&err), EXIT_VERIFICATION_FAILED);

        let err = verify(Variant::Legacy, &[0u8; 32], &signer_commitment, &signature).unwrap_err();
        assert_eq!(err, Error::InvalidPointEncoding);
        assert_eq!(exit_status(&err), EXIT_MALFORMED_INPUT);

        let err = verify(Variant::Tagged, &[0u8; 32], &signer_commitment, &signature[..63])
            .unwrap_err();
        assert_eq!(exit_status(&err), EXIT_MALFORMED_INPUT);
    }
}
