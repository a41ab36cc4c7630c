use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Create a deterministic RNG for a specific table + column combination.
///
/// `"table.column"` is hashed with SHA-256 into a 64-bit value and offset by
/// `seed`, so each column gets its own reproducible sequence.
pub fn column_rng(table: &str, column: &str, seed: u64) -> StdRng {
    let hash = Sha256::digest(format!("{table}.{column}").as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash[..8]);
    StdRng::seed_from_u64(u64::from_le_bytes(head).wrapping_add(seed))
}
