//! SRP client implementation.
//!
//! # Usage
//! Registration derives a salt, a private key and the private verifier,
//! runs the private verifier through each server's OPRF, and folds the
//! outputs into the public verifier the server stores:
//!
//! ```ignore
//! let client = SrpClient::new(&G_3072);
//! let salt = client.generate_salt();
//! let sk = client.derive_private_key(&salt, username, password)?;
//! let private_verifier = client.derive_private_verifier(&sk)?;
//!
//! let (state, request) = client.blind_oprf_input(&private_verifier)?;
//! let response = conn.send_oprf_request(username, &request)?;
//! let oprf_output = client.finalize_oprf(state, &response)?;
//!
//! let x = client.derive_verifier_hash(&[&hex::encode(&private_verifier), &oprf_output])?;
//! let v = client.derive_public_verifier(&x)?;
//! conn.send_registration_data(username, &salt, &v);
//! ```
//!
//! Login repeats the derivation, exchanges ephemerals, and proves key
//! possession in both directions:
//!
//! ```ignore
//! let ephemeral = client.generate_ephemeral();
//! let (salt, b_pub) = conn.send_handshake(username, &ephemeral.public)?;
//! // ... recompute x via the rate-limited OPRF round trips ...
//! let session = client.derive_session(&ephemeral.secret, &b_pub, &salt, username, &x)?;
//! let server_proof = conn.send_proof(&session.proof)?;
//! client.verify_session(&ephemeral.public, &session, &server_proof)?;
//! ```

use sha2::Sha256;

use crate::bigint::BigInt;
use crate::errors::{Error, Result};
use crate::groups::SrpParams;
use crate::hash::hash;
use crate::oprf::{self, BlindState};
use crate::utils::{compute_m1, compute_m2, compute_u, proofs_match};

/// SRP client bound to a group.
pub struct SrpClient<'a> {
    params: &'a SrpParams,
}

/// A per-login ephemeral pair. The secret must never be reused across
/// login attempts.
#[derive(Debug, Clone)]
pub struct Ephemeral {
    /// Secret exponent, hex
    pub secret: String,
    /// Public group element, hex
    pub public: String,
}

/// Client-side session state: the shared key and the proof sent to the
/// server.
#[derive(Debug, Clone)]
pub struct ClientSession {
    /// Session key K, hex
    pub key: String,
    /// Client proof M, hex
    pub proof: String,
}

impl<'a> SrpClient<'a> {
    /// Create a new SRP client instance.
    #[must_use]
    pub const fn new(params: &'a SrpParams) -> Self {
        Self { params }
    }

    /// A fresh random salt of the hash output width, as hex.
    #[must_use]
    pub fn generate_salt(&self) -> String {
        BigInt::random(self.params.hash_bytes).to_hex()
    }

    /// Private key `sk = H(salt, H(username | ":" | password))`.
    pub fn derive_private_key(&self, salt: &str, username: &str, password: &str) -> Result<String> {
        let salt = BigInt::from_hex(salt).map_err(|_| Error::BadInput { name: "salt" })?;
        let identity = hash::<Sha256>(&[username.into(), ":".into(), password.into()]);
        let sk = hash::<Sha256>(&[(&salt).into(), (&identity).into()]);
        Ok(sk.to_hex())
    }

    /// Private verifier `v' = g^sk mod N` as raw big-endian bytes.
    ///
    /// Never stored anywhere; it exists only to feed the OPRF.
    pub fn derive_private_verifier(&self, private_key: &str) -> Result<Vec<u8>> {
        let sk =
            BigInt::from_hex(private_key).map_err(|_| Error::BadInput { name: "private key" })?;
        Ok(self.params.g.mod_pow(&sk, &self.params.n).to_bytes())
    }

    /// Blind the private verifier for one OPRF server, returning the
    /// use-once state and the serialized request.
    pub fn blind_oprf_input(&self, private_verifier: &[u8]) -> Result<(BlindState, Vec<u8>)> {
        oprf::blind(private_verifier)
    }

    /// Finalize one server's OPRF response into its PRF output, as hex.
    pub fn finalize_oprf(&self, state: BlindState, response: &[u8]) -> Result<String> {
        Ok(hex::encode(oprf::finalize(state, response)?))
    }

    /// Fold the private verifier and the OPRF outputs into the verifier
    /// hash `x = H(v' | v1' | ... | vn')`.
    ///
    /// The hex strings are concatenated with no separator and the result
    /// reinterpreted as a single integer before hashing. The outputs carry
    /// no length prefix, so their order is load-bearing; reordering them
    /// yields a different x and a failed login.
    pub fn derive_verifier_hash(&self, parts: &[&str]) -> Result<String> {
        let concatenated: String = parts.concat();
        let folded = BigInt::from_hex(&concatenated)
            .map_err(|_| Error::BadInput { name: "verifier hash input" })?;
        Ok(hash::<Sha256>(&[(&folded).into()]).to_hex())
    }

    /// Public verifier `v = g^x mod N`, the value the server stores.
    pub fn derive_public_verifier(&self, x: &str) -> Result<String> {
        let x = BigInt::from_hex(x).map_err(|_| Error::BadInput { name: "x" })?;
        Ok(self.params.g.mod_pow(&x, &self.params.n).to_hex())
    }

    /// A fresh ephemeral `a, A = g^a mod N` for one login attempt.
    #[must_use]
    pub fn generate_ephemeral(&self) -> Ephemeral {
        let a = BigInt::random(self.params.hash_bytes);
        let a_pub = self.params.g.mod_pow(&a, &self.params.n);
        Ephemeral {
            secret: a.to_hex(),
            public: a_pub.to_hex(),
        }
    }

    /// Derive the session key and client proof from the server's reply.
    ///
    /// Fails with [`Error::InvalidServerEphemeral`] when `B mod N == 0`,
    /// before any secret-dependent computation.
    pub fn derive_session(
        &self,
        a: &str,
        b_pub: &str,
        salt: &str,
        username: &str,
        x: &str,
    ) -> Result<ClientSession> {
        let n = &self.params.n;
        let a = BigInt::from_hex(a).map_err(|_| Error::BadInput { name: "a" })?;
        let b_pub = BigInt::from_hex(b_pub).map_err(|_| Error::BadInput { name: "B" })?;
        let salt = BigInt::from_hex(salt).map_err(|_| Error::BadInput { name: "salt" })?;
        let x = BigInt::from_hex(x).map_err(|_| Error::BadInput { name: "x" })?;

        // Safeguard against malicious B
        if (&b_pub % n).is_zero() {
            return Err(Error::InvalidServerEphemeral);
        }

        let a_pub = self.params.g.mod_pow(&a, n);
        let u = compute_u(&a_pub, &b_pub);

        // S = (B - k*g^x) ^ (a + u*x), with +N compensating the
        // subtraction so the base never goes negative before reduction.
        let k_g_x = &(&self.params.k * &self.params.g.mod_pow(&x, n)) % n;
        let base = &(&(&b_pub + n) - &k_g_x) % n;
        let exp = &a + &(&u * &x);
        let s = base.mod_pow(&exp, n);

        let key = hash::<Sha256>(&[(&s).into()]);
        let proof = compute_m1(self.params, username, &salt, &a_pub, &b_pub, &key);

        Ok(ClientSession {
            key: key.to_hex(),
            proof: proof.to_hex(),
        })
    }

    /// Verify the server's proof `P = H(A, M, K)` against the session.
    ///
    /// On mismatch the session key must be discarded.
    pub fn verify_session(
        &self,
        a_pub: &str,
        session: &ClientSession,
        server_proof: &str,
    ) -> Result<()> {
        let a_pub = BigInt::from_hex(a_pub).map_err(|_| Error::BadInput { name: "A" })?;
        let m = BigInt::from_hex(&session.proof).map_err(|_| Error::BadInput { name: "M" })?;
        let key = BigInt::from_hex(&session.key).map_err(|_| Error::BadInput { name: "K" })?;

        let expected = compute_m2(&a_pub, &m, &key);
        if proofs_match(&expected.to_hex(), server_proof) {
            Ok(())
        } else {
            Err(Error::BadServerProof)
        }
    }
}
