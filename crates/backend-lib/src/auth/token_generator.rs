//! Opaque refresh token strings.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// 256 bits, well above the 122 a v4 UUID would give
const REFRESH_TOKEN_BYTES: usize = 32;

/// Fresh refresh token: random bytes from the thread-local CSPRNG, base64url without padding
pub(crate) fn new_refresh_token() -> String {
    url_safe_random(REFRESH_TOKEN_BYTES)
}

fn url_safe_random(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
