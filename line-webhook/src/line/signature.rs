//! HMAC-SHA256 signatures of LINE webhook bodies.
//!
//! LINE signs the raw request body with the channel secret and sends the
//! base64-encoded digest in the `X-Line-Signature` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs `body` with the channel secret and returns the base64-encoded signature.
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Checks the base64-encoded `signature` against `body` in constant time.
pub fn verify(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let signature = match STANDARD.decode(signature) {
        Ok(v) => v,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(v) => v,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}
