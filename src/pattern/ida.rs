// Sun Oct 18 2026 - Alex

//! IDA-style signature text: `"48 8B 05 ?? ?? ?? ?? 48 85 C0"`.
//!
//! Tokens are separated by whitespace. A token is either one or two hex
//! digits (`"1"` and `"01"` are the same byte) or a run of `?` characters.
//! Every `?` run is exactly one wildcard byte, so `"?"`, `"??"` and `"???"`
//! all occupy a single slot.

use crate::pattern::wildcard::find_wildcard;
use crate::pattern::PatternError;

/// Parses IDA-style text into normalized bytes and the inferred wildcard.
pub(crate) fn parse_ida(text: &str) -> Result<(Box<[u8]>, u8), PatternError> {
    let slots = tokenize(text)?;

    let wildcard = find_wildcard(slots.iter().flatten().copied(), |_| true)?;

    let bytes = slots.into_iter()
        .map(|slot| slot.unwrap_or(wildcard))
        .collect();

    Ok((bytes, wildcard))
}

/// Parses whitespace separated hex bytes with no wildcards, e.g. `"48 8b 05"`.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, PatternError> {
    text.split_whitespace().map(decode_hex_token).collect()
}

fn tokenize(text: &str) -> Result<Vec<Option<u8>>, PatternError> {
    text.split_whitespace()
        .map(|token| {
            if token.bytes().all(|c| c == b'?') {
                Ok(None)
            } else {
                decode_hex_token(token).map(Some)
            }
        })
        .collect()
}

fn decode_hex_token(token: &str) -> Result<u8, PatternError> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(PatternError::MalformedToken(token.to_string()));
    }

    u8::from_str_radix(token, 16).map_err(|_| PatternError::MalformedToken(token.to_string()))
}
