//! The protocol hash H.
//!
//! H absorbs a heterogeneous argument list in order and emits the digest as
//! a [`BigInt`]. The absorption convention is the interop contract and must
//! be preserved byte-for-byte:
//!
//! - a byte-string argument contributes its raw bytes;
//! - a [`BigInt`] argument contributes the ASCII bytes of its even-length
//!   hex encoding (not the decoded bytes).

use digest::Digest;

use crate::bigint::BigInt;

/// One argument to [`hash`].
#[derive(Debug, Clone, Copy)]
pub enum HashInput<'a> {
    /// Absorbed as raw bytes.
    Bytes(&'a [u8]),
    /// Absorbed as the ASCII of the even-length hex encoding.
    Int(&'a BigInt),
}

impl<'a> From<&'a [u8]> for HashInput<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a> From<&'a str> for HashInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Bytes(s.as_bytes())
    }
}

impl<'a> From<&'a BigInt> for HashInput<'a> {
    fn from(i: &'a BigInt) -> Self {
        Self::Int(i)
    }
}

/// H(a1, a2, ...) over an ordered argument list.
///
/// The digest bytes are read big-endian; the result carries a hex width of
/// twice the digest length, so re-encoding keeps leading zeros.
pub fn hash<D: Digest>(args: &[HashInput<'_>]) -> BigInt {
    let mut d = D::new();
    for arg in args {
        match arg {
            HashInput::Bytes(b) => d.update(b),
            HashInput::Int(i) => d.update(i.to_even_hex().as_bytes()),
        }
    }
    let digest = d.finalize();
    BigInt::from_bytes_be(&digest, 2 * digest.len())
}
