//! Non-negative arbitrary-precision integers with hex-width tracking.
//!
//! Wire values in the protocol travel as hex strings, and several of them
//! (salts, digests, random ephemerals) must re-encode at their original
//! width, leading zeros included. [`BigInt`] therefore pairs a
//! [`num_bigint::BigUint`] with an optional `hex_width`: values parsed from
//! hex or drawn from the RNG remember how many digits they were born with,
//! while arithmetic results carry no width and encode minimally.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Rem, Sub};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{OsRng, RngCore};

use crate::errors::{Error, Result};

/// Immutable non-negative integer value.
///
/// Ordering and equality consider only the numeric value; `hex_width` is
/// presentation state and never participates in comparisons.
#[derive(Debug, Clone)]
pub struct BigInt {
    value: BigUint,
    hex_width: Option<usize>,
}

impl BigInt {
    /// Parse a case-insensitive hex string, recording its width.
    ///
    /// The empty string parses to zero with `hex_width = 0`.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self {
                value: BigUint::zero(),
                hex_width: Some(0),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::BadInput { name: "hex" });
        }
        // all-hexdigit input cannot fail to parse
        let value = BigUint::parse_bytes(s.as_bytes(), 16).ok_or(Error::BadInput { name: "hex" })?;
        Ok(Self {
            value,
            hex_width: Some(s.len()),
        })
    }

    /// A uniformly random value of `n_bytes` bytes from the system CSPRNG.
    pub fn random(n_bytes: usize) -> Self {
        let mut buf = vec![0u8; n_bytes];
        OsRng.fill_bytes(&mut buf);
        Self {
            value: BigUint::from_bytes_be(&buf),
            hex_width: Some(2 * n_bytes),
        }
    }

    fn from_value(value: BigUint) -> Self {
        Self {
            value,
            hex_width: None,
        }
    }

    /// Big-endian bytes with a recorded hex width; used for digest output.
    pub(crate) fn from_bytes_be(bytes: &[u8], hex_width: usize) -> Self {
        Self {
            value: BigUint::from_bytes_be(bytes),
            hex_width: Some(hex_width),
        }
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Self::from_value(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Self::from_value(BigUint::one())
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The recorded hex width, if any.
    pub fn hex_width(&self) -> Option<usize> {
        self.hex_width
    }

    /// Lowercase hex, left-padded with `0` to `hex_width` when one is
    /// recorded, minimal otherwise. A recorded width of zero emits the
    /// empty string, so `from_hex("")` round-trips.
    pub fn to_hex(&self) -> String {
        if self.hex_width == Some(0) {
            return String::new();
        }
        let minimal = self.value.to_str_radix(16);
        match self.hex_width {
            Some(width) if width > minimal.len() => {
                let mut s = String::with_capacity(width);
                for _ in 0..width - minimal.len() {
                    s.push('0');
                }
                s.push_str(&minimal);
                s
            }
            _ => minimal,
        }
    }

    /// [`to_hex`](Self::to_hex) forced to even length by one leading `0`.
    ///
    /// This is the canonical form absorbed by the protocol hash and decoded
    /// by [`to_bytes`](Self::to_bytes).
    pub fn to_even_hex(&self) -> String {
        let s = self.to_hex();
        if s.len() % 2 == 0 {
            s
        } else {
            let mut padded = String::with_capacity(s.len() + 1);
            padded.push('0');
            padded.push_str(&s);
            padded
        }
    }

    /// Big-endian bytes of the minimal even-length hex encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// `self^exp mod m`; the result lies in `[0, m)`.
    ///
    /// An exponent of zero yields `1 mod m`.
    pub fn mod_pow(&self, exp: &Self, m: &Self) -> Self {
        Self::from_value(self.value.modpow(&exp.value, &m.value))
    }

    /// Modular inverse by Fermat's little theorem: `self^(m-2) mod m`.
    ///
    /// Only correct for prime `m`; callers must ensure it. Fails with
    /// [`Error::NoInverse`] when `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &Self) -> Result<Self> {
        if !self.value.gcd(&m.value).is_one() {
            return Err(Error::NoInverse);
        }
        let exp = &m.value - 2u32;
        Ok(Self::from_value(self.value.modpow(&exp, &m.value)))
    }

    /// Bitwise xor of the two values.
    pub fn xor(&self, other: &Self) -> Self {
        Self::from_value(&self.value ^ &other.value)
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Add for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: Self) -> BigInt {
        BigInt::from_value(&self.value + &rhs.value)
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    /// Integer subtraction; the minuend must not be smaller than the
    /// subtrahend (callers compensate modulo N first).
    fn sub(self, rhs: Self) -> BigInt {
        BigInt::from_value(&self.value - &rhs.value)
    }
}

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: Self) -> BigInt {
        BigInt::from_value(&self.value * &rhs.value)
    }
}

impl Div for &BigInt {
    type Output = BigInt;

    /// Floor division.
    fn div(self, rhs: Self) -> BigInt {
        BigInt::from_value(&self.value / &rhs.value)
    }
}

impl Rem for &BigInt {
    type Output = BigInt;

    fn rem(self, rhs: Self) -> BigInt {
        BigInt::from_value(&self.value % &rhs.value)
    }
}

impl From<u32> for BigInt {
    fn from(v: u32) -> Self {
        Self::from_value(BigUint::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn hex_round_trip_preserves_width() {
        let a = BigInt::from_hex("00ab3F").unwrap();
        assert_eq!(a.hex_width(), Some(6));
        assert_eq!(a.to_hex(), "00ab3f");
    }

    #[test]
    fn empty_hex_is_zero() {
        let z = BigInt::from_hex("").unwrap();
        assert!(z.is_zero());
        assert_eq!(z.hex_width(), Some(0));
        // Round-trips at its recorded width, like any other parse.
        assert_eq!(z.to_hex(), "");
    }

    #[test]
    fn widthless_zero_still_prints() {
        assert_eq!(BigInt::zero().to_hex(), "0");
    }

    #[test]
    fn rejects_non_hex() {
        assert_eq!(
            BigInt::from_hex("12g4").unwrap_err(),
            Error::BadInput { name: "hex" }
        );
    }

    #[test]
    fn arithmetic_drops_width() {
        let a = BigInt::from_hex("00ff").unwrap();
        let b = BigInt::from_hex("01").unwrap();
        let sum = &a + &b;
        assert_eq!(sum.hex_width(), None);
        assert_eq!(sum.to_hex(), "100");
    }

    #[test]
    fn basic_arithmetic() {
        let a = BigInt::from_hex("64").unwrap(); // 100
        let b = BigInt::from_hex("07").unwrap();
        assert_eq!((&a + &b).to_hex(), "6b");
        assert_eq!((&a - &b).to_hex(), "5d");
        assert_eq!((&a * &b).to_hex(), "2bc");
        assert_eq!((&a / &b).to_hex(), "e"); // floor(100/7) = 14
        assert_eq!((&a % &b).to_hex(), "2");
    }

    #[test]
    fn mod_pow_matches_reference() {
        // 4^13 mod 497 = 445
        let b = BigInt::from(4);
        let e = BigInt::from(13);
        let m = BigInt::from(497);
        assert_eq!(b.mod_pow(&e, &m), BigInt::from(445));
    }

    #[test]
    fn mod_pow_zero_exponent() {
        let b = BigInt::from_hex("deadbeef").unwrap();
        let m = BigInt::from(97);
        assert_eq!(b.mod_pow(&BigInt::zero(), &m), BigInt::one());
    }

    #[test]
    fn mod_inverse_prime_modulus() {
        // 3 * 4 = 12 = 1 mod 11
        let a = BigInt::from(3);
        let m = BigInt::from(11);
        assert_eq!(a.mod_inverse(&m).unwrap(), BigInt::from(4));
    }

    #[test]
    fn mod_inverse_undefined() {
        let a = BigInt::from(6);
        let m = BigInt::from(9);
        assert_eq!(a.mod_inverse(&m).unwrap_err(), Error::NoInverse);
    }

    #[test]
    fn xor_values() {
        let a = BigInt::from_hex("ff00").unwrap();
        let b = BigInt::from_hex("0ff0").unwrap();
        assert_eq!(a.xor(&b).to_hex(), "f0f0");
    }

    #[test]
    fn random_has_requested_width() {
        let r = BigInt::random(32);
        assert_eq!(r.hex_width(), Some(64));
        assert_eq!(r.to_hex().len(), 64);
    }

    #[test]
    fn to_bytes_is_minimal_big_endian() {
        let a = BigInt::from_hex("00012345").unwrap();
        assert_eq!(a.to_bytes(), hex!("012345"));
    }

    #[test]
    fn even_hex_pads_odd_lengths() {
        let a = BigInt::from_hex("abc").unwrap();
        assert_eq!(a.to_even_hex(), "0abc");
    }

    #[test]
    fn comparisons_ignore_width() {
        let a = BigInt::from_hex("00ff").unwrap();
        let b = BigInt::from_hex("ff").unwrap();
        assert_eq!(a, b);
        assert!(BigInt::from_hex("fe").unwrap() < b);
    }
}
