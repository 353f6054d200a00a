//! SRP group parameters from [RFC 5054](https://tools.ietf.org/html/rfc5054).
//!
//! The group is fixed at build time: the 3072-bit safe prime with `g = 5`.
//! Changing it would break interop with every stored verifier, so no other
//! groups are exposed.

use digest::Digest;
use once_cell::sync::Lazy;
use sha2::Sha256;

use crate::bigint::BigInt;
use crate::hash::hash;

/// Immutable SRP group, shared process-wide by reference.
#[derive(Debug)]
pub struct SrpParams {
    /// A large safe prime (N = 2q+1, where q is prime)
    pub n: BigInt,
    /// A generator modulo N
    pub g: BigInt,
    /// The SRP-6a multiplier k = H(N, g)
    pub k: BigInt,
    /// Width of the protocol hash output in bytes
    pub hash_bytes: usize,
}

// RFC 5054 appendix A, 3072-bit group (taken from RFC 3526 group 15).
const N_3072_HEX: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
    020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437\
    4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05\
    98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB\
    9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
    3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D04507A33\
    A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7\
    ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6BF12FFA06D98A0864\
    D87602733EC86A64521F2B18177B200CBBE117577A615D6C770988C0BAD946E2\
    08E24FA074E5AB3143DB5BFCE0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF";

/// The process-wide 3072-bit group.
pub static G_3072: Lazy<SrpParams> = Lazy::new(|| {
    let n = BigInt::from_hex(N_3072_HEX).expect("RFC 5054 prime should be valid hex");
    let g = BigInt::from(5);
    let k = hash::<Sha256>(&[(&n).into(), (&g).into()]);
    SrpParams {
        n,
        g,
        k,
        hash_bytes: Sha256::output_size(),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_shape() {
        let params = &*G_3072;
        assert_eq!(params.n.to_hex().len(), 768);
        assert_eq!(params.g, BigInt::from(5));
        assert_eq!(params.hash_bytes, 32);
    }

    #[test]
    fn k_is_hash_of_n_and_g() {
        let params = &*G_3072;
        let k = hash::<Sha256>(&[(&params.n).into(), (&params.g).into()]);
        assert_eq!(params.k, k);
        assert_eq!(params.k.to_hex().len(), 64);
    }
}
