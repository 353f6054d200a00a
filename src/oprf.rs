//! Client and server roles of the rate-limitable OPRF, over the
//! P256-SHA256 suite of the `voprf` crate.
//!
//! The wrappers speak serialized requests and responses (SEC1 compressed
//! points) so the caller can frame them however it likes; the core never
//! interprets them beyond (de)serialization.

use p256::NistP256;
use rand_core::{OsRng, RngCore};
use voprf::{BlindedElement, EvaluationElement, OprfClient, OprfServer};

use crate::errors::{Error, Result};

type Suite = NistP256;

/// Length in bytes of an OPRF private key (a P-256 scalar).
pub const OPRF_KEY_LENGTH: usize = 32;

/// Use-once client state bridging [`blind`] and [`finalize`].
///
/// Deliberately neither `Clone` nor serializable: the blinding factor must
/// never leave the process or be reused, and consuming the state by value
/// in [`finalize`] makes reuse a compile error.
pub struct BlindState {
    state: OprfClient<Suite>,
    input: Vec<u8>,
}

/// Blind `input` for evaluation, returning the use-once state and the
/// serialized request to ship to the server.
pub fn blind(input: &[u8]) -> Result<(BlindState, Vec<u8>)> {
    let blind_result = OprfClient::<Suite>::blind(input, &mut OsRng).map_err(Error::Crypto)?;
    let request = blind_result.message.serialize().to_vec();
    Ok((
        BlindState {
            state: blind_result.state,
            input: input.to_vec(),
        },
        request,
    ))
}

/// Compatibility shim over [`blind`] for string inputs.
///
/// A string consisting solely of hex digits is decoded as hex (odd lengths
/// gain a leading zero); anything else is taken as UTF-8 bytes. Ambiguous
/// for short alphanumeric passphrases, so callers wanting determinism pass
/// raw bytes to [`blind`] instead.
pub fn blind_text(input: &str) -> Result<(BlindState, Vec<u8>)> {
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_hexdigit()) {
        let bytes = if input.len() % 2 == 0 {
            hex::decode(input)
        } else {
            hex::decode(format!("0{input}"))
        }
        .map_err(|_| Error::BadInput { name: "oprf input" })?;
        blind(&bytes)
    } else {
        blind(input.as_bytes())
    }
}

/// Unblind and hash the server's response, consuming the blind state.
pub fn finalize(state: BlindState, response: &[u8]) -> Result<Vec<u8>> {
    let evaluation =
        EvaluationElement::<Suite>::deserialize(response).map_err(|_| Error::BadResponse)?;
    let output = state
        .state
        .finalize(&state.input, &evaluation)
        .map_err(|_| Error::BadResponse)?;
    Ok(output.to_vec())
}

/// Server role: holds the long-lived OPRF private key and evaluates
/// blinded requests.
///
/// Stateless beyond the key, so evaluation is safe to call concurrently.
pub struct OprfEvaluator {
    server: OprfServer<Suite>,
    key: Vec<u8>,
}

impl OprfEvaluator {
    /// Create an evaluator with a fresh uniformly random private key.
    pub fn new() -> Self {
        // Rejection-sample until the bytes land in the scalar field; a
        // redraw happens with probability < 2^-32 for P-256.
        loop {
            let mut key = vec![0u8; OPRF_KEY_LENGTH];
            OsRng.fill_bytes(&mut key);
            if let Ok(server) = OprfServer::new_with_key(&key) {
                return Self { server, key };
            }
        }
    }

    /// Create an evaluator from an externally managed key.
    ///
    /// Rotating the key invalidates every verifier derived with it.
    pub fn with_key(key: &[u8]) -> Result<Self> {
        let server = OprfServer::new_with_key(key).map_err(Error::Crypto)?;
        Ok(Self {
            server,
            key: key.to_vec(),
        })
    }

    /// The private key bytes, for operator backup.
    pub fn private_key(&self) -> &[u8] {
        &self.key
    }

    /// Deserialize a request, blind-evaluate it under the key and
    /// serialize the response.
    pub fn evaluate(&self, request: &[u8]) -> Result<Vec<u8>> {
        let blinded = BlindedElement::<Suite>::deserialize(request).map_err(|_| Error::BadRequest)?;
        let evaluation = self.server.blind_evaluate(&blinded);
        Ok(evaluation.serialize().to_vec())
    }
}

impl Default for OprfEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let evaluator = OprfEvaluator::new();
        let (state, request) = blind(b"some input").unwrap();
        let response = evaluator.evaluate(&request).unwrap();
        let output = finalize(state, &response).unwrap();
        assert_eq!(output.len(), 32);
    }

    #[test]
    fn deterministic_under_fixed_key() {
        let evaluator = OprfEvaluator::new();
        let twin = OprfEvaluator::with_key(evaluator.private_key()).unwrap();

        let (s1, r1) = blind(b"input").unwrap();
        let (s2, r2) = blind(b"input").unwrap();
        let o1 = finalize(s1, &evaluator.evaluate(&r1).unwrap()).unwrap();
        let o2 = finalize(s2, &twin.evaluate(&r2).unwrap()).unwrap();

        // Different blinds, same key, same input: same PRF output.
        assert_eq!(o1, o2);
    }

    #[test]
    fn distinct_keys_distinct_outputs() {
        let (s1, r1) = blind(b"input").unwrap();
        let (s2, r2) = blind(b"input").unwrap();
        let o1 = finalize(s1, &OprfEvaluator::new().evaluate(&r1).unwrap()).unwrap();
        let o2 = finalize(s2, &OprfEvaluator::new().evaluate(&r2).unwrap()).unwrap();
        assert_ne!(o1, o2);
    }

    #[test]
    fn malformed_request_rejected() {
        let evaluator = OprfEvaluator::new();
        assert_eq!(evaluator.evaluate(b"junk").unwrap_err(), Error::BadRequest);
    }

    #[test]
    fn malformed_response_rejected() {
        let (state, _) = blind(b"input").unwrap();
        assert_eq!(finalize(state, b"junk").unwrap_err(), Error::BadResponse);
    }

    #[test]
    fn hex_looking_text_is_decoded() {
        let evaluator = OprfEvaluator::new();

        let (s1, r1) = blind_text("00ff17").unwrap();
        let (s2, r2) = blind(&[0x00, 0xff, 0x17]).unwrap();
        let o1 = finalize(s1, &evaluator.evaluate(&r1).unwrap()).unwrap();
        let o2 = finalize(s2, &evaluator.evaluate(&r2).unwrap()).unwrap();
        assert_eq!(o1, o2);

        // Non-hex text falls through to UTF-8 bytes.
        let (s3, r3) = blind_text("pass word!").unwrap();
        let (s4, r4) = blind(b"pass word!").unwrap();
        let o3 = finalize(s3, &evaluator.evaluate(&r3).unwrap()).unwrap();
        let o4 = finalize(s4, &evaluator.evaluate(&r4).unwrap()).unwrap();
        assert_eq!(o3, o4);
    }
}
