// Sun Oct 18 2026 - Alex

use crate::pattern::PatternError;

/// Picks the lowest byte value that none of the literal bytes use.
///
/// `is_literal` is called once per input byte, in order, and decides whether
/// that byte will survive as a literal in the final pattern.
pub fn find_wildcard<I, F>(bytes: I, mut is_literal: F) -> Result<u8, PatternError>
where
    I: IntoIterator<Item = u8>,
    F: FnMut(u8) -> bool,
{
    let mut used = [false; 256];

    for byte in bytes {
        if is_literal(byte) {
            used[byte as usize] = true;
        }
    }

    used.iter()
        .position(|&taken| !taken)
        .map(|slot| slot as u8)
        .ok_or(PatternError::SentinelExhausted)
}

/// Lengths must already be equal, see `masked_to_wildcard`.
pub(crate) fn find_wildcard_masked(pattern: &[u8], mask: &[u8], unknown: u8) -> Result<u8, PatternError> {
    let mut mask_iter = mask.iter();
    find_wildcard(pattern.iter().copied(), |_| mask_iter.next() != Some(&unknown))
}
