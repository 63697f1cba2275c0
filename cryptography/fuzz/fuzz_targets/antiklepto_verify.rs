#![no_main]

use antiklepto_cryptography::{
    antiklepto::{
        commit, mocks::Signer, verify, HostNonce, Variant, HOST_NONCE_LENGTH, SIGNATURE_LENGTH,
    },
    Error,
};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub legacy: bool,
    pub host_nonce: Vec<u8>,
    pub signer_commitment: Vec<u8>,
    pub signature: Vec<u8>,
    pub seed: u64,
    pub flip: Option<(u8, u8)>,
}

fn variant(legacy: bool) -> Variant {
    if legacy {
        Variant::Legacy
    } else {
        Variant::Tagged
    }
}

// Arbitrary inputs never panic and length errors are reported first
fn fuzz_arbitrary(input: &FuzzInput) {
    let variant = variant(input.legacy);
    let result = verify(
        variant,
        &input.host_nonce,
        &input.signer_commitment,
        &input.signature,
    );
    if input.host_nonce.len() != HOST_NONCE_LENGTH {
        assert_eq!(
            result,
            Err(Error::InvalidInputLength {
                expected: HOST_NONCE_LENGTH,
                actual: input.host_nonce.len()
            })
        );
        assert!(commit(variant, &input.host_nonce).is_err());
    } else if input.signature.len() != SIGNATURE_LENGTH {
        assert_eq!(
            result,
            Err(Error::InvalidInputLength {
                expected: SIGNATURE_LENGTH,
                actual: input.signature.len()
            })
        );
    } else if input.signer_commitment.len() != variant.encoding().size() {
        assert_eq!(result, Err(Error::InvalidPointEncoding));
    } else {
        assert!(matches!(
            result,
            Ok(()) | Err(Error::InvalidPointEncoding) | Err(Error::NonceVerificationFailed)
        ));
    }
}

// An honest signer always verifies and a flipped bit in r or the host nonce is caught
fn fuzz_honest(input: &FuzzInput) {
    let variant = variant(input.legacy);
    let mut rng = StdRng::seed_from_u64(input.seed);
    let mut signer = Signer::new(&mut rng, variant);
    let host_nonce = HostNonce::random(&mut rng);
    let signer_commitment = signer
        .commit(&mut rng, &host_nonce.commit(variant))
        .unwrap();
    let signature = signer.sign(&host_nonce, &[0x42; 32]).unwrap();
    assert_eq!(
        verify(variant, host_nonce.as_ref(), &signer_commitment, &signature),
        Ok(())
    );

    let Some((position, mask)) = input.flip else {
        return;
    };
    if mask == 0 {
        return;
    }
    let position = position as usize % HOST_NONCE_LENGTH;

    let mut tampered = signature.as_ref().to_vec();
    tampered[position] ^= mask;
    assert_eq!(
        verify(variant, host_nonce.as_ref(), &signer_commitment, &tampered),
        Err(Error::NonceVerificationFailed)
    );

    let mut tampered = host_nonce.as_ref().to_vec();
    tampered[position] ^= mask;
    assert_eq!(
        verify(variant, &tampered, &signer_commitment, &signature),
        Err(Error::NonceVerificationFailed)
    );
}

fuzz_target!(|input: FuzzInput| {
    fuzz_arbitrary(&input);
    fuzz_honest(&input);
});
