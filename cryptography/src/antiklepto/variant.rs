use crate::{secp256k1::Encoding, Hasher, Sha256};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Label of the tag prefixed to the host commitment preimage.
pub const DATA_TAG: &[u8] = b"s2c/ecdsa/data";

/// Label of the tag prefixed to the tweak preimage.
pub const POINT_TAG: &[u8] = b"s2c/ecdsa/point";

/// Returned when parsing an unknown [Variant] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

/// Revision of the anti-klepto protocol spoken by the signer.
///
/// Both revisions share the verification equation `R = H(C || host_nonce)*G + R1` and
/// differ only in domain separation and in how the signer serializes `R1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Domain-tagged hashes; the signer commitment is a compressed point.
    Tagged,
    /// Untagged hashes; the signer commitment is an uncompressed point.
    Legacy,
}

impl Variant {
    /// Encoding of the signer commitment on the wire.
    pub const fn encoding(self) -> Encoding {
        match self {
            Self::Tagged => Encoding::Compressed,
            Self::Legacy => Encoding::Uncompressed,
        }
    }

    /// Tag label used when committing to the host nonce, if any.
    pub const fn data_tag(self) -> Option<&'static [u8]> {
        match self {
            Self::Tagged => Some(DATA_TAG),
            Self::Legacy => None,
        }
    }

    /// Tag label used when deriving the tweak, if any.
    pub const fn point_tag(self) -> Option<&'static [u8]> {
        match self {
            Self::Tagged => Some(POINT_TAG),
            Self::Legacy => None,
        }
    }

    pub(crate) fn data_hasher(self) -> Sha256 {
        hasher(self.data_tag())
    }

    pub(crate) fn point_hasher(self) -> Sha256 {
        hasher(self.point_tag())
    }
}

fn hasher(tag: Option<&[u8]>) -> Sha256 {
    match tag {
        Some(label) => Sha256::tagged(label),
        None => Sha256::new(),
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tagged => write!(f, "tagged"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tagged" => Ok(Self::Tagged),
            "legacy" => Ok(Self::Legacy),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
