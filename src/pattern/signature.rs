// Sun Oct 18 2026 - Alex

use crate::pattern::ida::parse_ida;
use crate::pattern::mask::{masked_to_wildcard, DEFAULT_BYTE_MASK_UNKNOWN, DEFAULT_MASK_UNKNOWN};
use crate::pattern::wildcard::find_wildcard;
use crate::pattern::PatternError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A fixed-length byte signature where some positions match any byte.
///
/// Wildcard positions hold the `wildcard` value, which never equals a literal
/// byte of the same signature. An empty signature matches nothing.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    bytes: Box<[u8]>,
    wildcard: u8,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every byte equal to `wildcard` becomes a wildcard position.
    pub fn with_wildcard(pattern: impl AsRef<[u8]>, wildcard: u8) -> Self {
        Self::from_parts(pattern.as_ref().into(), wildcard)
    }

    /// Signature with no wildcard positions.
    pub fn from_bytes(pattern: impl AsRef<[u8]>) -> Result<Self, PatternError> {
        let pattern = pattern.as_ref();
        let wildcard = find_wildcard(pattern.iter().copied(), |_| true)?;
        Ok(Self::from_parts(pattern.into(), wildcard))
    }

    /// String mask, `'?'` marks unknown bytes: `masked(b"\x48\x8b\x05", "xx?")`.
    pub fn masked(pattern: impl AsRef<[u8]>, mask: &str) -> Result<Self, PatternError> {
        Self::masked_with(pattern, mask, DEFAULT_MASK_UNKNOWN)
    }

    /// Byte mask, `0` marks unknown bytes: `masked_bytes([0x48, 0x8b], [1, 0])`.
    pub fn masked_bytes(pattern: impl AsRef<[u8]>, mask: impl AsRef<[u8]>) -> Result<Self, PatternError> {
        Self::masked_with(pattern, mask, DEFAULT_BYTE_MASK_UNKNOWN)
    }

    pub fn masked_with(
        pattern: impl AsRef<[u8]>,
        mask: impl AsRef<[u8]>,
        unknown: u8,
    ) -> Result<Self, PatternError> {
        let (bytes, wildcard) = masked_to_wildcard(pattern.as_ref(), mask.as_ref(), unknown)?;
        Ok(Self::from_parts(bytes, wildcard))
    }

    /// Parses IDA-style text such as `"48 8B 05 ?? ?? ?? ?? 48 85 C0"`.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let (bytes, wildcard) = parse_ida(text)?;
        Ok(Self::from_parts(bytes, wildcard))
    }

    fn from_parts(bytes: Box<[u8]>, wildcard: u8) -> Self {
        log::debug!("Built {}-byte signature, wildcard 0x{:02x}", bytes.len(), wildcard);
        Self { bytes, wildcard }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }

    /// Normalized bytes, wildcard positions hold [`Signature::wildcard`].
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_wildcard_at(&self, index: usize) -> bool {
        self.bytes.get(index) == Some(&self.wildcard)
    }

    pub fn wildcard_count(&self) -> usize {
        self.bytes.iter().filter(|&&b| b == self.wildcard).count()
    }

    pub fn literal_count(&self) -> usize {
        self.len() - self.wildcard_count()
    }

    #[inline]
    fn accepts(&self, expected: u8, actual: u8) -> bool {
        expected == actual || expected == self.wildcard
    }

    /// Whether `data` starts with this signature.
    pub fn matches(&self, data: &[u8]) -> bool {
        if self.is_empty() || data.len() < self.len() {
            return false;
        }

        self.bytes.iter()
            .zip(data.iter())
            .all(|(&expected, &actual)| self.accepts(expected, actual))
    }

    /// Offset of the first match in `haystack`.
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        if self.is_empty() || haystack.len() < self.len() {
            return None;
        }

        let found = haystack.windows(self.len()).position(|window| self.matches(window));
        log::trace!("Searched {} bytes, match at {:?}", haystack.len(), found);
        found
    }

    /// Offset of the first match in any borrowed, re-iterable byte sequence
    /// (`&[u8]`, `&VecDeque<u8>`, `slice.iter().skip(n)`, ...).
    ///
    /// The iterator is cloned once per candidate position. Only borrowing
    /// iterators are accepted so a clone never copies the haystack.
    pub fn find_iter<'a, I>(&self, haystack: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a u8>,
        I::IntoIter: Clone,
    {
        if self.is_empty() {
            return None;
        }

        let mut cursor = haystack.into_iter();
        let mut position = 0;

        loop {
            let mut probe = cursor.clone();
            let mut matched = true;

            for &expected in self.bytes.iter() {
                match probe.next() {
                    Some(&actual) if self.accepts(expected, actual) => {}
                    Some(_) => {
                        matched = false;
                        break;
                    }
                    None => return None,
                }
            }

            if matched {
                return Some(position);
            }

            cursor.next()?;
            position += 1;
        }
    }

    pub fn to_hex_string(&self) -> String {
        self.bytes.iter()
            .map(|&b| {
                if b == self.wildcard {
                    "??".to_string()
                } else {
                    format!("{:02X}", b)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl FromStr for Signature {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Equal when both match exactly the same inputs, whatever their wildcard values.
impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.bytes.iter()
                .zip(other.bytes.iter())
                .all(|(&a, &b)| match (a == self.wildcard, b == other.wildcard) {
                    (true, true) => true,
                    (false, false) => a == b,
                    _ => false,
                })
    }
}

impl Eq for Signature {}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn haystack() -> Vec<u8> {
        (0..0x400u32).map(|i| i as u8).collect()
    }

    #[test]
    fn test_empty_matches_nothing() {
        let sig = Signature::new();
        assert!(sig.is_empty());
        assert_eq!(sig.find(&haystack()), None);
        assert_eq!(sig.find_iter(haystack().iter()), None);
        assert!(!sig.matches(&[1, 2, 3]));
    }

    #[test]
    fn test_explicit_wildcard() {
        let sig = Signature::with_wildcard([1, 2, 3, 5], 2);
        assert_eq!(sig.wildcard_count(), 1);
        assert!(sig.is_wildcard_at(1));

        let mut data = haystack();
        data[0x200..0x204].copy_from_slice(&[1, 20, 3, 5]);
        assert_eq!(sig.find(&data), Some(0x200));
    }

    #[test]
    fn test_from_bytes_is_all_literal() {
        let sig = Signature::from_bytes([0x10, 0x11, 0x12]).unwrap();
        assert_eq!(sig.wildcard_count(), 0);
        assert_eq!(sig.wildcard(), 0);
        assert_eq!(sig.find(&haystack()), Some(0x10));
    }

    #[test]
    fn test_from_bytes_exhausted() {
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(Signature::from_bytes(&all), Err(PatternError::SentinelExhausted));
    }

    #[test]
    fn test_masked_exhausted() {
        let mut bytes: Vec<u8> = (0..=255).collect();
        bytes.push(0);
        let mut mask = vec![b'x'; 256];
        mask.push(b'?');
        assert_eq!(Signature::masked_with(&bytes, &mask, b'?'), Err(PatternError::SentinelExhausted));
    }

    #[test]
    fn test_find_not_found() {
        let sig = Signature::parse("36 ?? 54").unwrap();
        assert_eq!(sig.find(&haystack()), None);
        assert_eq!(sig.find_iter(&haystack()), None);
    }

    #[test]
    fn test_haystack_shorter_than_signature() {
        let sig = Signature::parse("01 02 03").unwrap();
        assert_eq!(sig.find(&[1, 2]), None);
        assert_eq!(sig.find_iter(&[1u8, 2]), None);
    }

    #[test]
    fn test_match_at_end() {
        let sig = Signature::parse("fe ?? ").unwrap();
        let data = [0u8, 1, 0xfe, 0xff];
        assert_eq!(sig.find(&data), Some(2));
        assert_eq!(sig.find_iter(&data), Some(2));
    }

    #[test]
    fn test_find_iter_agrees_with_find() {
        let sig = Signature::parse("7f ? 81").unwrap();
        let data = haystack();
        let deque: VecDeque<u8> = data.iter().copied().collect();

        assert_eq!(sig.find(&data), Some(0x7f));
        assert_eq!(sig.find_iter(data.iter()), Some(0x7f));
        assert_eq!(sig.find_iter(&deque), Some(0x7f));
        assert_eq!(sig.find_iter(data.iter().skip(0x80)), Some(0x17f - 0x80));
        assert_eq!(sig.find_iter(data[..0x7f].iter().chain(&data[0x80..])), Some(0x17e));
    }

    #[test]
    fn test_first_match_wins() {
        let sig = Signature::parse("aa ??").unwrap();
        assert_eq!(sig.find(&[0, 0xaa, 1, 0xaa, 2]), Some(1));
    }

    #[test]
    fn test_literal_equal_to_other_wildcard_slot() {
        let sig = Signature::masked_bytes([2, 2], [1, 0]).unwrap();
        assert_ne!(sig.wildcard(), 2);
        assert_eq!(sig.find(&[3, 2, 9]), Some(1));
        assert_eq!(sig.find(&[3, 3, 9]), None);
    }

    #[test]
    fn test_equality_ignores_wildcard_value() {
        let a = Signature::with_wildcard([1, 0, 3], 0);
        let b = Signature::parse("01 ?? 03").unwrap();
        let c = Signature::parse("01 ?? 04").unwrap();
        let d = Signature::parse("01 02 03").unwrap();
        assert_eq!(a, b);
        assert_ne!(b, c);
        assert_ne!(b, d);
    }

    #[test]
    fn test_hex_string_round_trip() {
        let sig = Signature::parse("1 ? 36 54 ??? ff").unwrap();
        assert_eq!(sig.to_hex_string(), "01 ?? 36 54 ?? FF");
        assert_eq!(sig.to_string().parse::<Signature>().unwrap(), sig);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Signature::parse("10 ? 12").unwrap();
        let mut copy = original.clone();
        assert_eq!(copy.find(&haystack()), Some(0x10));

        copy = Signature::parse("20 21").unwrap();
        assert_eq!(copy.find(&haystack()), Some(0x20));
        assert_eq!(original.find(&haystack()), Some(0x10));
    }

    #[test]
    fn test_serde_as_string() {
        let sig = Signature::parse("48 8b ?? 05").unwrap();
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, "\"48 8B ?? 05\"");

        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);

        assert!(serde_json::from_str::<Signature>("\"48 zz\"").is_err());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signature>();
    }
}
