// Sun Oct 18 2026 - Alex

pub mod error;
pub mod ida;
pub mod mask;
pub mod signature;
pub mod wildcard;

pub use error::PatternError;
pub use ida::parse_hex_bytes;
pub use mask::{DEFAULT_BYTE_MASK_UNKNOWN, DEFAULT_MASK_UNKNOWN};
pub use signature::Signature;
pub use wildcard::find_wildcard;

/// Offset of the first match of `signature` in `haystack`.
pub fn find_signature(signature: &Signature, haystack: &[u8]) -> Option<usize> {
    signature.find(haystack)
}
