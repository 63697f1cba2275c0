use super::Variant;
use crate::{
    secp256k1::{Point, COMPRESSED_LENGTH},
    Error,
};
use antiklepto_utils::hex;
use std::fmt::{Debug, Display};

/// The signer's commitment `R1 = k1*G` to its private nonce `k1`.
///
/// Retains the bytes it was received as alongside the decoded point.
#[derive(Clone, PartialEq, Eq)]
pub struct SignerCommitment {
    raw: Vec<u8>,
    point: Point,
}

impl SignerCommitment {
    /// Decode a signer commitment serialized as required by `variant`.
    pub fn decode(bytes: &[u8], variant: Variant) -> Result<Self, Error> {
        let point = Point::decode(bytes, variant.encoding())?;
        Ok(Self {
            raw: bytes.to_vec(),
            point,
        })
    }

    /// Serialize `point` as a signer speaking `variant` would.
    pub fn from_point(point: Point, variant: Variant) -> Self {
        Self {
            raw: point.encode(variant.encoding()),
            point,
        }
    }

    /// The committed nonce point `R1`.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// `R1` in compressed form, regardless of how it was received.
    pub fn compressed(&self) -> [u8; COMPRESSED_LENGTH] {
        self.point.encode_compressed()
    }
}

impl AsRef<[u8]> for SignerCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for SignerCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for SignerCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
