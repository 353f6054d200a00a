#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! # Oblivious Secure Remote Password (O-SRP)
//!
//! A password-authenticated key exchange that augments [SRP-6a][rfc5054]
//! with one or more rate-limited Oblivious Pseudo-Random Function (OPRF)
//! evaluations, optionally sharded across independent servers. The
//! password-derived verifier is bound to live OPRF outputs that an
//! attacker cannot replay offline, so guessing a password requires online
//! interaction with every participating OPRF server — each of which
//! enforces a per-username request budget — even when the verifier store
//! is fully compromised.
//!
//! # Protocol description
//!
//! All arithmetic is modulo the RFC 5054 3072-bit safe prime `N` with
//! generator `g = 5`; `H` is SHA-256 under the absorption convention of
//! [`hash`](hash::hash). The OPRF runs over P-256 with SHA-256.
//!
//! Registration (one OPRF round trip per server):
//!
//! |       Server                  |   Data transfer      |      Client                      |
//! |-------------------------------|----------------------|----------------------------------|
//! |                               |                      | `s = random(32)`                 |
//! |                               |                      | `sk = H(s, H(user ‖ ":" ‖ pw))`  |
//! |                               |                      | `v' = g^sk mod N`                |
//! |rate limit; `resp = Eval(req)` | <- `user`, `req_i`   | `req_i = Blind(v')`              |
//! |                               | `resp_i` ->          | `v_i' = Finalize(resp_i)`        |
//! |                               |                      | `x = H(v' ‖ v_1' ‖ .. ‖ v_n')`   |
//! |store `{user, s, v}`           | <- `user`, `s`, `v`  | `v = g^x mod N`                  |
//!
//! Login:
//!
//! |       Server                  |   Data transfer      |      Client                      |
//! |-------------------------------|----------------------|----------------------------------|
//! |                               | <- `user`, `A`       | `a = random(32)`, `A = g^a`      |
//! |`b = random(32)`               |                      |                                  |
//! |`B = k·v + g^b`                | `s`, `B` ->          | recompute `sk`, `v'`, `x`        |
//! |                               |  (OPRF round trips)  |   via rate-limited OPRF          |
//! |`u = H(A, B)`                  |                      | `u = H(A, B)`                    |
//! |`S = (A·v^u)^b`                |                      | `S = (B − k·g^x)^(a + u·x)`      |
//! |`K = H(S)`                     |                      | `K = H(S)`                       |
//! |verify `M`; abort on mismatch  | <- `M`               | `M = H(H(N)⊕H(g), H(user), s, A, B, K)` |
//! |`P = H(A, M, K)`               | `P` ->               | verify `P`; abort on mismatch    |
//!
//! Proof comparisons are constant-time. A mismatched `M` aborts before the
//! server proof exists; a mismatched `P` means the client discards `K`.
//!
//! The crate is the protocol engine only: transport, message framing and
//! verifier storage belong to the caller.
//!
//! [rfc5054]: https://tools.ietf.org/html/rfc5054

pub mod bigint;
pub mod client;
pub mod errors;
pub mod groups;
pub mod hash;
pub mod oprf;
pub mod ratelimit;
pub mod server;
mod utils;

pub use self::{
    bigint::BigInt,
    client::{ClientSession, Ephemeral, SrpClient},
    errors::{Error, Result},
    groups::{SrpParams, G_3072},
    ratelimit::SlidingWindowLimiter,
    server::{ServerConfig, ServerSession, SrpServer, UserRecord},
};
