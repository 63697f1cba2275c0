use crate::{secp256k1::SCALAR_LENGTH, Error};
use antiklepto_utils::hex;
use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

/// Length of a compact ECDSA signature (R || S).
pub const SIGNATURE_LENGTH: usize = 2 * SCALAR_LENGTH;

/// Compact ECDSA signature: big-endian `r` followed by big-endian `s` (no DER wrapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Assemble a signature from its `r` and `s` components.
    pub fn from_scalars(r: [u8; SCALAR_LENGTH], s: [u8; SCALAR_LENGTH]) -> Self {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(&r);
        raw[SCALAR_LENGTH..].copy_from_slice(&s);
        Self(raw)
    }

    /// The `r` component (the x-coordinate of the nonce point modulo `n`).
    pub fn r(&self) -> [u8; SCALAR_LENGTH] {
        let mut r = [0u8; SCALAR_LENGTH];
        r.copy_from_slice(&self.0[..SCALAR_LENGTH]);
        r
    }

    /// The `s` component.
    pub fn s(&self) -> [u8; SCALAR_LENGTH] {
        let mut s = [0u8; SCALAR_LENGTH];
        s.copy_from_slice(&self.0[SCALAR_LENGTH..]);
        s
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(value: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; SIGNATURE_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidInputLength {
                expected: SIGNATURE_LENGTH,
                actual: value.len(),
            })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Signature {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let signature = Signature::from_scalars([0x01; SCALAR_LENGTH], [0x02; SCALAR_LENGTH]);
        assert_eq!(signature.r(), [0x01; SCALAR_LENGTH]);
        assert_eq!(signature.s(), [0x02; SCALAR_LENGTH]);
        assert_eq!(Signature::try_from(signature.as_ref()), Ok(signature));
    }

    #[test]
    fn test_invalid_length() {
        for len in [0, 63, 65] {
            assert_eq!(
                Signature::try_from(vec![0u8; len].as_slice()),
                Err(Error::InvalidInputLength {
                    expected: SIGNATURE_LENGTH,
                    actual: len
                })
            );
        }
    }
}
