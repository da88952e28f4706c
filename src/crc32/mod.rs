use crate::crc32_tables::CRC32_TABLE;

/// Folds `bytes` into a running CRC-32 (reversed IEEE polynomial). Seed with
/// 0 for the first call; the result of one call is the seed for the next, so
/// a stream can be checksummed in arbitrary slices.
pub fn update_crc32(crc: u32, bytes: &[u8]) -> u32 {
    let mut crc = !crc;
    for &byte in bytes {
        crc = CRC32_TABLE[usize::from(crc as u8 ^ byte)] ^ (crc >> 8);
    }
    !crc
}
