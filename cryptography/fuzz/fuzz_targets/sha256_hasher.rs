#![no_main]

use antiklepto_cryptography::{Hasher, Sha256};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sha2::{Digest as RefSha2Digest, Sha256 as RefSha256};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub label: Vec<u8>,
    pub chunks: Vec<Vec<u8>>,
}

// Chunked hashing matches the reference implementation
fn fuzz_untagged(chunks: &[Vec<u8>]) {
    let mut our_hasher = Sha256::new();
    let mut ref_hasher = RefSha256::new();
    for chunk in chunks {
        our_hasher.update(chunk);
        ref_hasher.update(chunk);
    }
    assert_eq!(
        our_hasher.finalize().as_ref(),
        ref_hasher.finalize().as_slice()
    );
}

// Tagged hashing matches SHA256(SHA256(label) || SHA256(label) || message), also after reset
fn fuzz_tagged(label: &[u8], chunks: &[Vec<u8>]) {
    let tag = RefSha256::digest(label);
    let mut our_hasher = Sha256::tagged(label);
    for _ in 0..2 {
        let mut ref_hasher = RefSha256::new();
        ref_hasher.update(tag);
        ref_hasher.update(tag);
        for chunk in chunks {
            our_hasher.update(chunk);
            ref_hasher.update(chunk);
        }
        assert_eq!(
            our_hasher.finalize().as_ref(),
            ref_hasher.finalize().as_slice()
        );
        our_hasher.reset();
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz_untagged(&input.chunks);
    fuzz_tagged(&input.label, &input.chunks);
});
