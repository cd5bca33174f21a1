// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rolling section checksum.
//!
//! The section is read as little-endian `u32` words. `low` is the plain
//! 32-bit sum; `high` counts the carries out of it. The stored value is the
//! complement of their 32-bit sum. Every addition wraps.

/// Compute the checksum of `data`. Trailing bytes that do not fill a whole
/// word are ignored.
pub fn section_checksum(data: &[u8]) -> u32 {
    let mut high: u32 = 0;
    let mut low: u32 = 0;

    for word in data.chunks_exact(4) {
        let val = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        let sum = (u64::from(high) << 32) | u64::from(low);

        high = (sum.wrapping_add(u64::from(val)) >> 32) as u32;
        low = low.wrapping_add(val);
    }

    !high.wrapping_add(low)
}
