//! CRC32 checksums for persisted record frames
//!
//! Every frame in the store blob carries a trailing checksum over all of
//! its preceding bytes, and every decode verifies it. A mismatch decodes
//! to `CorruptData`; corruption is never ignored or repaired.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies that the computed checksum matches the expected one.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
