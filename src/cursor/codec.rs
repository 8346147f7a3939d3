//! Cursor token encodings

use super::key::Cursor;
use crate::config::PaginationSettings;
use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use std::sync::Arc;

/// Reversible transform between cursors and client tokens
///
/// Encoding must be deterministic: the same cursor always yields the same
/// token. Decoding failures are reported as `InvalidCursor` with an empty
/// parameter name; the paginator fills in the parameter it read.
pub trait CursorCodec: Send + Sync + fmt::Debug {
    /// Encode a cursor into an opaque token
    fn encode(&self, cursor: &Cursor) -> Result<String>;

    /// Decode a token produced by [`CursorCodec::encode`]
    fn decode(&self, token: &str) -> Result<Cursor>;
}

// ============================================================================
// Base64
// ============================================================================

/// URL-safe base64 over a compact JSON body
///
/// The token is opaque to clients but not tamper-proof; use
/// [`SignedCursorCodec`] when that matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64CursorCodec;

impl CursorCodec for Base64CursorCodec {
    fn encode(&self, cursor: &Cursor) -> Result<String> {
        let body = serde_json::to_vec(cursor)?;
        Ok(URL_SAFE_NO_PAD.encode(body))
    }

    fn decode(&self, token: &str) -> Result<Cursor> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| Error::invalid_cursor("", format!("Invalid cursor: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::invalid_cursor("", format!("Invalid cursor: {e}")))
    }
}

// ============================================================================
// Signed (HS256)
// ============================================================================

/// HS256-signed cursor tokens
///
/// Any modification of the token fails signature validation.
pub struct SignedCursorCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for SignedCursorCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedCursorCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl SignedCursorCodec {
    /// Create a codec signing with the given secret
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Cursors carry no registered claims and never expire
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl CursorCodec for SignedCursorCodec {
    fn encode(&self, cursor: &Cursor) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), cursor, &self.encoding_key)
            .map_err(|e| Error::Other(format!("Failed to sign cursor: {e}")))
    }

    fn decode(&self, token: &str) -> Result<Cursor> {
        decode::<Cursor>(token.trim(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Error::invalid_cursor("", format!("Invalid cursor: {e}")))
    }
}

/// Codec selected by settings: signed when a secret is configured
pub fn codec_from_settings(settings: &PaginationSettings) -> Arc<dyn CursorCodec> {
    match &settings.cursor_secret {
        Some(secret) => Arc::new(SignedCursorCodec::new(secret)),
        None => Arc::new(Base64CursorCodec),
    }
}
