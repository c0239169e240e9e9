// Sun Oct 18 2026 - Alex

use crate::pattern::wildcard::find_wildcard_masked;
use crate::pattern::PatternError;

/// Mask character marking an unknown byte in string masks such as `"xx?x"`.
pub const DEFAULT_MASK_UNKNOWN: u8 = b'?';

/// Mask value marking an unknown byte in byte masks such as `[1, 1, 0, 1]`.
pub const DEFAULT_BYTE_MASK_UNKNOWN: u8 = 0;

/// Folds a pattern and its parallel mask into wildcard form.
///
/// Returns the normalized bytes together with the inferred wildcard.
pub(crate) fn masked_to_wildcard(
    pattern: &[u8],
    mask: &[u8],
    unknown: u8,
) -> Result<(Box<[u8]>, u8), PatternError> {
    if pattern.len() != mask.len() {
        return Err(PatternError::LengthMismatch {
            pattern: pattern.len(),
            mask: mask.len(),
        });
    }

    let wildcard = find_wildcard_masked(pattern, mask, unknown)?;

    let bytes = pattern.iter()
        .zip(mask.iter())
        .map(|(&byte, &m)| if m != unknown { byte } else { wildcard })
        .collect();

    Ok((bytes, wildcard))
}
