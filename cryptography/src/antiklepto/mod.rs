//! Host-side verification of the anti-klepto (sign-to-contract) protocol for ECDSA.
//!
//! # Protocol
//!
//! 1. The host draws a secret 32-byte [HostNonce] and sends its [HostCommitment] to the signer.
//! 2. The signer picks a private nonce `k1` and replies with `R1 = k1*G` (the [SignerCommitment]).
//! 3. The host reveals the host nonce. The signer signs with `k = k1 + t`, where
//!    `t = H(C || host_nonce)` (see [tweak]) and `C` is `R1` in compressed form.
//! 4. The host checks that `r == (t*G + R1).x mod n` ([verify]) before using the [Signature].
//!
//! Because the signer is bound to `k1` before it learns the host nonce, it cannot grind its
//! final nonce to leak information. [Ceremony] drives these steps in order.
//!
//! # Variants
//!
//! Signers speak one of two revisions of the protocol (see [Variant]):
//!
//! | Variant  | Host commitment                      | Tweak `t`                                  | Signer commitment |
//! |----------|--------------------------------------|--------------------------------------------|-------------------|
//! | `Tagged` | `SHA256(T_d \|\| T_d \|\| host_nonce)` | `SHA256(T_p \|\| T_p \|\| C \|\| host_nonce)` | 33 bytes          |
//! | `Legacy` | `SHA256(host_nonce)`                 | `SHA256(C \|\| host_nonce)`                  | 65 bytes          |
//!
//! where `T_d = SHA256("s2c/ecdsa/data")` and `T_p = SHA256("s2c/ecdsa/point")`.

mod ceremony;
pub use ceremony::Ceremony;
mod commitment;
pub use commitment::SignerCommitment;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
mod nonce;
pub use nonce::{commit, HostCommitment, HostNonce, HOST_NONCE_LENGTH};
mod signature;
pub use signature::{Signature, SIGNATURE_LENGTH};
mod variant;
pub use variant::{UnknownVariant, Variant, DATA_TAG, POINT_TAG};
mod verifier;
pub use verifier::{tweak, verify, Verifier};
