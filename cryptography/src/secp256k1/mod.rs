//! The secp256k1 capabilities required to verify anti-klepto signatures.
//!
//! Only the following operations are exposed, all backed by the constant-time
//! arithmetic of [k256]:
//! - decode a point (compressed or uncompressed SEC 1 encoding)
//! - encode a point (compressed or uncompressed)
//! - multiply the generator by a scalar
//! - add two points
//! - extract the x-coordinate of a point reduced modulo the curve order `n`
//! - reduce 32 big-endian bytes to a scalar modulo `n`
//!
//! [Point] never represents the point at infinity: operations that could produce it
//! return `None` instead.

use crate::Error;
use antiklepto_utils::hex;
use k256::{
    elliptic_curve::{
        ops::Reduce,
        point::AffineCoordinates,
        sec1::{FromEncodedPoint, ToEncodedPoint},
    },
    AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, U256,
};
use rand::{CryptoRng, RngCore};
use std::{
    fmt::{Debug, Display},
    ops::Add,
};

/// Length of a big-endian scalar (or field element).
pub const SCALAR_LENGTH: usize = 32;

/// Length of a compressed point (Y-Parity || X).
pub const COMPRESSED_LENGTH: usize = 33;

/// Length of an uncompressed point (0x04 || X || Y).
pub const UNCOMPRESSED_LENGTH: usize = 65;

/// Big-endian encoding of the order `n` of the secp256k1 group.
pub const ORDER: [u8; SCALAR_LENGTH] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const PREFIX_UNCOMPRESSED: u8 = 0x04;

/// SEC 1 point encodings accepted on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `0x02`/`0x03` (parity of y) followed by the 32-byte x-coordinate.
    Compressed,
    /// `0x04` followed by the 32-byte x and y coordinates.
    Uncompressed,
}

impl Encoding {
    /// Number of bytes in a point serialized with this encoding.
    pub const fn size(self) -> usize {
        match self {
            Self::Compressed => COMPRESSED_LENGTH,
            Self::Uncompressed => UNCOMPRESSED_LENGTH,
        }
    }

    /// Returns whether `prefix` is a valid leading byte for this encoding.
    pub const fn accepts(self, prefix: u8) -> bool {
        match self {
            Self::Compressed => prefix == PREFIX_EVEN || prefix == PREFIX_ODD,
            Self::Uncompressed => prefix == PREFIX_UNCOMPRESSED,
        }
    }
}

/// An integer modulo the curve order `n`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Scalar(pub(crate) k256::Scalar);

impl Scalar {
    /// Interpret `bytes` as a big-endian integer and reduce it modulo `n`.
    pub fn reduce(bytes: &[u8; SCALAR_LENGTH]) -> Self {
        let bytes: FieldBytes = (*bytes).into();
        Self(<k256::Scalar as Reduce<U256>>::reduce_bytes(&bytes))
    }

    /// Generate a uniformly random, non-zero scalar.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(*NonZeroScalar::random(rng))
    }

    /// Returns whether this scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == k256::Scalar::ZERO
    }

    /// Big-endian encoding of the scalar.
    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        self.0.to_bytes().into()
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self(k256::Scalar::from(value))
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.to_bytes()))
    }
}

/// A point on secp256k1 other than the point at infinity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Point(ProjectivePoint);

impl Point {
    /// The generator `G`.
    pub const GENERATOR: Self = Self(ProjectivePoint::GENERATOR);

    /// Decode a point serialized with `encoding`.
    ///
    /// Fails with [Error::InvalidPointEncoding] if the length or prefix does not match
    /// `encoding`, if a coordinate is not a canonical field element, or if the point
    /// is not on the curve.
    pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<Self, Error> {
        if bytes.len() != encoding.size() {
            return Err(Error::InvalidPointEncoding);
        }
        match bytes.first() {
            Some(prefix) if encoding.accepts(*prefix) => {}
            _ => return Err(Error::InvalidPointEncoding),
        }
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidPointEncoding)?;
        let point: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        let point = point.ok_or(Error::InvalidPointEncoding)?;
        Ok(Self(point.into()))
    }

    /// Serialize the point as `0x02`/`0x03` (parity of y) || x.
    pub fn encode_compressed(&self) -> [u8; COMPRESSED_LENGTH] {
        let affine = self.0.to_affine();
        let mut encoded = [0u8; COMPRESSED_LENGTH];
        encoded[0] = if bool::from(affine.y_is_odd()) {
            PREFIX_ODD
        } else {
            PREFIX_EVEN
        };
        encoded[1..].copy_from_slice(&affine.x());
        encoded
    }

    /// Serialize the point as `0x04` || x || y.
    pub fn encode_uncompressed(&self) -> [u8; UNCOMPRESSED_LENGTH] {
        let encoded = self.0.to_affine().to_encoded_point(false);
        let mut uncompressed = [0u8; UNCOMPRESSED_LENGTH];
        uncompressed.copy_from_slice(encoded.as_bytes());
        uncompressed
    }

    /// Serialize the point with the provided `encoding`.
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        match encoding {
            Encoding::Compressed => self.encode_compressed().to_vec(),
            Encoding::Uncompressed => self.encode_uncompressed().to_vec(),
        }
    }

    /// Compute `scalar * G`, returning `None` if `scalar` is zero.
    pub fn mul_base(scalar: &Scalar) -> Option<Self> {
        Self::new(ProjectivePoint::GENERATOR * scalar.0)
    }

    /// Compute `self + other`, returning `None` if the sum is the point at infinity.
    pub fn add(&self, other: &Self) -> Option<Self> {
        Self::new(self.0 + other.0)
    }

    /// The x-coordinate of the point reduced modulo `n` (big-endian).
    ///
    /// This is the `r` value of an ECDSA signature whose nonce point is `self`.
    pub fn x_mod_order(&self) -> [u8; SCALAR_LENGTH] {
        let x: FieldBytes = self.0.to_affine().x();
        <k256::Scalar as Reduce<U256>>::reduce_bytes(&x)
            .to_bytes()
            .into()
    }

    fn new(point: ProjectivePoint) -> Option<Self> {
        if point == ProjectivePoint::IDENTITY {
            return None;
        }
        Some(Self(point))
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.encode_compressed()))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.encode_compressed()))
    }
}
