use sha2::{Digest, Sha256};

pub fn hash_buffer(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// First 12 hex digits, enough to eyeball a round trip.
pub fn short_hash(data: &[u8]) -> String {
    let mut full = hash_buffer(data);
    full.truncate(12);
    full
}
