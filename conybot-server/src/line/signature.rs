// src/line/signature.rs

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use conybot_common::Error;

type HmacSha256 = Hmac<Sha256>;

/// Verify the `x-line-signature` header: base64 of the HMAC-SHA256 digest
/// of the raw request body, keyed with the channel secret. The comparison
/// is constant-time via `verify_slice`.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> Result<(), Error> {
    let decoded = BASE64
        .decode(signature)
        .map_err(|_| Error::Signature("signature is not valid base64".to_string()))?;

    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| Error::Signature(format!("invalid channel secret: {e}")))?;
    mac.update(body);
    mac.verify_slice(&decoded)
        .map_err(|_| Error::Signature("signature mismatch".to_string()))
}

/// Compute the signature a caller would send for `body`. Used by tests and
/// local tooling.
pub fn sign_body(channel_secret: &str, body: &[u8]) -> Result<String, Error> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| Error::Signature(format!("invalid channel secret: {e}")))?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
