//! Error types.

use core::fmt;

/// Protocol error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed caller-supplied value (non-hex input, zero verifier, ...).
    BadInput {
        /// Name of the offending value
        name: &'static str,
    },
    /// The client's public ephemeral reduced to zero modulo N.
    InvalidClientEphemeral,
    /// The server's public ephemeral reduced to zero modulo N.
    InvalidServerEphemeral,
    /// The client's session proof did not match; no server proof is emitted.
    BadClientProof,
    /// The server's session proof did not match; the derived key must be discarded.
    BadServerProof,
    /// The per-username OPRF evaluation budget for the current window is exhausted.
    RateLimited,
    /// The modular inverse does not exist (gcd with the modulus is not 1).
    NoInverse,
    /// The serialized OPRF request could not be deserialized.
    BadRequest,
    /// The serialized OPRF response could not be deserialized or finalized.
    BadResponse,
    /// Failure inside the OPRF primitive.
    Crypto(voprf::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadInput { name } => write!(f, "bad_input: malformed '{name}' value"),
            Self::InvalidClientEphemeral => {
                write!(f, "invalid_ephemeral: client public value is 0 mod N")
            }
            Self::InvalidServerEphemeral => {
                write!(f, "invalid_ephemeral: server public value is 0 mod N")
            }
            Self::BadClientProof => write!(f, "bad_proof: incorrect client proof"),
            Self::BadServerProof => write!(f, "bad_proof: incorrect server proof"),
            Self::RateLimited => write!(f, "rate_limited: OPRF evaluation budget exhausted"),
            Self::NoInverse => write!(f, "no_inverse: modular inverse undefined"),
            Self::BadRequest => write!(f, "bad_request: malformed OPRF request"),
            Self::BadResponse => write!(f, "bad_response: malformed OPRF response"),
            Self::Crypto(e) => write!(f, "crypto: OPRF primitive failure: {e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type
pub type Result<T> = core::result::Result<T, Error>;
