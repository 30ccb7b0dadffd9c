/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Used for catalog point ids and stub-embedding buckets. A collision between two
/// catalog URLs means one entry overwrites the other on ingest; at catalog scale
/// (hundreds to thousands of entries) the probability is negligible.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Stable point id for a catalog entry, keyed by its URL.
#[inline]
pub fn point_id_for_url(url: &str) -> u64 {
    hash_to_u64(url.trim().as_bytes())
}

#[inline]
pub fn hash_token(token: &str) -> u64 {
    hash_to_u64(token.as_bytes())
}
