//! Sensor API key generation

use rand::RngCore;

/// API key prefix for identification
pub const API_KEY_PREFIX: &str = "msk_";

/// Generate a new sensor API key: `msk_<64 hex chars>` from 32 random bytes.
pub fn generate_api_key() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    format!("{}{}", API_KEY_PREFIX, hex::encode(random_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_have_prefix_and_length() {
        let key = generate_api_key();
        assert!(key.starts_with(API_KEY_PREFIX));
        assert_eq!(key.len(), API_KEY_PREFIX.len() + 64);
        assert!(key[API_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
