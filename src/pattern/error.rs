// Sun Oct 18 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern size did not match mask size: {pattern} bytes, {mask} mask entries")]
    LengthMismatch { pattern: usize, mask: usize },
    #[error("Malformed token: {0:?}")]
    MalformedToken(String),
    #[error("Unable to find unused byte in the provided pattern")]
    SentinelExhausted,
}
