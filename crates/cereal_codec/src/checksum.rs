//! CRC-32 used by version 2 collections.

/// Reflected IEEE polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Computes the CRC-32 of `data`.
///
/// Reflected polynomial `0xEDB88320`, initial value `0xFFFFFFFF`, final
/// complement. The reduction is bit-serial and needs no lookup table.
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFF_u32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (POLYNOMIAL & mask);
        }
    }
    !crc
}
