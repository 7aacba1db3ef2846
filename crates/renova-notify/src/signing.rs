use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
///
/// The caller signs the exact bytes it transmits; re-serializing after
/// signing would break verification on the receiving side.
pub fn sign(message: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts any key length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
