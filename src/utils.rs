//! Shared protocol computations used by both peers.

use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::bigint::BigInt;
use crate::groups::SrpParams;
use crate::hash::hash;

// u = H(A, B)
pub(crate) fn compute_u(a_pub: &BigInt, b_pub: &BigInt) -> BigInt {
    hash::<Sha256>(&[a_pub.into(), b_pub.into()])
}

// H(N) XOR H(g)
pub(crate) fn compute_hash_n_xor_hash_g(params: &SrpParams) -> BigInt {
    let h_n = hash::<Sha256>(&[(&params.n).into()]);
    let h_g = hash::<Sha256>(&[(&params.g).into()]);
    h_n.xor(&h_g)
}

// M1 = H(H(N) XOR H(g), H(U), s, A, B, K)
pub(crate) fn compute_m1(
    params: &SrpParams,
    username: &str,
    salt: &BigInt,
    a_pub: &BigInt,
    b_pub: &BigInt,
    key: &BigInt,
) -> BigInt {
    let prefix = compute_hash_n_xor_hash_g(params);
    let username_hash = hash::<Sha256>(&[username.into()]);
    hash::<Sha256>(&[
        (&prefix).into(),
        (&username_hash).into(),
        salt.into(),
        a_pub.into(),
        b_pub.into(),
        key.into(),
    ])
}

// M2 = H(A, M1, K)
pub(crate) fn compute_m2(a_pub: &BigInt, m1: &BigInt, key: &BigInt) -> BigInt {
    hash::<Sha256>(&[a_pub.into(), m1.into(), key.into()])
}

// Constant-time comparison of an expected lowercase hex digest against a
// caller-supplied one; reveals only the boolean outcome.
pub(crate) fn proofs_match(expected_hex: &str, provided_hex: &str) -> bool {
    let provided = provided_hex.to_ascii_lowercase();
    expected_hex
        .as_bytes()
        .ct_eq(provided.as_bytes())
        .unwrap_u8()
        == 1
}
