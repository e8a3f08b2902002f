use tracing::trace;

use crate::errors::{DuelError, DuelResult};
use crate::metrics::{measure, Timed};

/// Mask isolating the 16 least significant bits
pub const LOW_BITS_MASK: u32 = 0xFFFF;

/// Whether two values agree on their low 16 bits
#[inline]
pub fn low_bits_match(a: u32, b: u32) -> bool {
    a & LOW_BITS_MASK == b & LOW_BITS_MASK
}

/// Counts index-aligned pairs that agree on their low 16 bits.
///
/// Both inputs must hold exactly `expected_len` values. Anything else is a caller bug
/// and is reported as [`DuelError::LengthMismatch`] instead of comparing a prefix.
pub fn count_matches(a: &[u32], b: &[u32], expected_len: usize) -> DuelResult<Timed<u64>> {
    if a.len() != expected_len || b.len() != expected_len {
        return Err(DuelError::length_mismatch(expected_len, a.len(), b.len()));
    }

    let timed = measure("comparator", expected_len, || {
        a.iter()
            .zip(b)
            .filter(|&(&x, &y)| low_bits_match(x, y))
            .count() as u64
    });
    trace!("{} matching pairs out of {}", timed.value, expected_len);
    Ok(timed)
}
