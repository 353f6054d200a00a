//! SRP server implementation.
//!
//! # Usage
//! The server owns the OPRF key and the per-username rate limiter, so one
//! instance serves every session:
//!
//! ```ignore
//! let server = SrpServer::new(&G_3072, 60_000, 3);
//! ```
//!
//! During registration and login the client routes its blinded OPRF
//! requests through [`SrpServer::perform_oprf_eval`], which charges the
//! username's budget before touching the key.
//!
//! At login, look up the stored [`UserRecord`], generate an ephemeral and
//! send `(salt, B)` to the client:
//!
//! ```ignore
//! let record = db.retrieve_user_record(username);
//! let ephemeral = server.generate_ephemeral(&record.verifier)?;
//! conn.reply_to_handshake(&record.salt, &ephemeral.public);
//! ```
//!
//! Finally receive the client proof, verify it and reply with the server
//! proof; the shared key is in the returned session:
//!
//! ```ignore
//! let client_proof = conn.receive_proof();
//! let session = server.derive_session(
//!     &ephemeral.secret, &a_pub, &record.salt, username, &record.verifier, &client_proof,
//! )?;
//! conn.send_proof(&session.proof);
//! ```

use std::time::Instant;

use sha2::Sha256;

use crate::bigint::BigInt;
use crate::client::Ephemeral;
use crate::errors::{Error, Result};
use crate::groups::SrpParams;
use crate::hash::hash;
use crate::oprf::OprfEvaluator;
use crate::ratelimit::SlidingWindowLimiter;
use crate::utils::{compute_m1, compute_m2, compute_u, proofs_match};

/// Data provided by users upon registration, usually stored in a database.
///
/// Created at registration, read at login, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account name, public to both sides
    pub username: String,
    /// Salt, hex
    pub salt: String,
    /// Public password verifier v, hex
    pub verifier: String,
}

/// Server construction options.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Sliding-window length for per-username OPRF evaluations, in ms
    pub rate_window_ms: u64,
    /// Maximum OPRF evaluations per username per window
    pub rate_max_requests: usize,
    /// Externally managed OPRF private key; generated fresh when absent
    pub oprf_private_key: Option<Vec<u8>>,
}

/// Server-side session state: the shared key and the proof returned to
/// the client.
#[derive(Debug, Clone)]
pub struct ServerSession {
    /// Session key K, hex
    pub key: String,
    /// Server proof P, hex
    pub proof: String,
}

/// SRP server state: group parameters, OPRF evaluator and rate limiter.
///
/// Every session-scoped method takes `&self`; the limiter is internally
/// synchronized, so a single instance may serve sessions concurrently.
pub struct SrpServer<'a> {
    params: &'a SrpParams,
    evaluator: OprfEvaluator,
    limiter: SlidingWindowLimiter,
    epoch: Instant,
}

impl<'a> SrpServer<'a> {
    /// Create a server with a fresh OPRF key and the given rate limits.
    #[must_use]
    pub fn new(params: &'a SrpParams, rate_window_ms: u64, rate_max_requests: usize) -> Self {
        Self {
            params,
            evaluator: OprfEvaluator::new(),
            limiter: SlidingWindowLimiter::new(rate_window_ms, rate_max_requests),
            epoch: Instant::now(),
        }
    }

    /// Create a server from a full configuration, injecting the OPRF key
    /// when one is supplied.
    pub fn with_config(params: &'a SrpParams, config: ServerConfig) -> Result<Self> {
        let evaluator = match &config.oprf_private_key {
            Some(key) => OprfEvaluator::with_key(key)?,
            None => OprfEvaluator::new(),
        };
        Ok(Self {
            params,
            evaluator,
            limiter: SlidingWindowLimiter::new(config.rate_window_ms, config.rate_max_requests),
            epoch: Instant::now(),
        })
    }

    /// The OPRF private key bytes, read-only, for operator backup.
    ///
    /// Rotating the key invalidates every verifier derived with it.
    #[must_use]
    pub fn oprf_private_key(&self) -> &[u8] {
        self.evaluator.private_key()
    }

    // Milliseconds since construction; monotonic by Instant's contract.
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Evaluate one blinded OPRF request for `username`, charging its
    /// rate-limit budget first.
    ///
    /// A saturated window fails with [`Error::RateLimited`] before the
    /// key is touched.
    pub fn perform_oprf_eval(&self, username: &str, request: &[u8]) -> Result<Vec<u8>> {
        self.limiter.check_and_record(username, self.now_ms())?;
        self.evaluator.evaluate(request)
    }

    /// A fresh ephemeral `b, B = (k*v + g^b mod N) mod N` for one login
    /// attempt. Rejects a zero verifier.
    pub fn generate_ephemeral(&self, verifier: &str) -> Result<Ephemeral> {
        let v = BigInt::from_hex(verifier).map_err(|_| Error::BadInput { name: "verifier" })?;
        if v.is_zero() {
            return Err(Error::BadInput { name: "verifier" });
        }
        let b = BigInt::random(self.params.hash_bytes);
        let b_pub = self.compute_b_pub(&b, &v);
        Ok(Ephemeral {
            secret: b.to_hex(),
            public: b_pub.to_hex(),
        })
    }

    //  (k*v + g^b) % N
    fn compute_b_pub(&self, b: &BigInt, v: &BigInt) -> BigInt {
        let n = &self.params.n;
        let inter = &self.params.k * v;
        &(&inter + &self.params.g.mod_pow(b, n)) % n
    }

    /// Verify the client's proof and derive the session key and server
    /// proof.
    ///
    /// B is recomputed from the stored ephemeral secret and verifier; a
    /// transmitted B is never trusted. Fails with
    /// [`Error::InvalidClientEphemeral`] when `A mod N == 0`, and with
    /// [`Error::BadClientProof`] on proof mismatch, in which case no
    /// server proof is produced.
    pub fn derive_session(
        &self,
        b: &str,
        a_pub: &str,
        salt: &str,
        username: &str,
        verifier: &str,
        client_proof: &str,
    ) -> Result<ServerSession> {
        let n = &self.params.n;
        let b = BigInt::from_hex(b).map_err(|_| Error::BadInput { name: "b" })?;
        let a_pub = BigInt::from_hex(a_pub).map_err(|_| Error::BadInput { name: "A" })?;
        let salt = BigInt::from_hex(salt).map_err(|_| Error::BadInput { name: "salt" })?;
        let v = BigInt::from_hex(verifier).map_err(|_| Error::BadInput { name: "verifier" })?;

        // Safeguard against malicious A
        if (&a_pub % n).is_zero() {
            return Err(Error::InvalidClientEphemeral);
        }

        let b_pub = self.compute_b_pub(&b, &v);
        let u = compute_u(&a_pub, &b_pub);

        // S = (A * v^u) ^ b
        let s = (&a_pub * &v.mod_pow(&u, n)).mod_pow(&b, n);
        let key = hash::<Sha256>(&[(&s).into()]);

        let expected = compute_m1(self.params, username, &salt, &a_pub, &b_pub, &key);
        if !proofs_match(&expected.to_hex(), client_proof) {
            return Err(Error::BadClientProof);
        }

        let proof = compute_m2(&a_pub, &expected, &key);
        Ok(ServerSession {
            key: key.to_hex(),
            proof: proof.to_hex(),
        })
    }
}
