// Sun Oct 18 2026 - Alex

use crate::pattern::Signature;
use crate::scan::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub file: PathBuf,
    pub file_size: usize,
    pub signature: Signature,
    pub offset: Option<usize>,
    pub address: Option<u64>,
}

impl ScanReport {
    pub fn new(file: PathBuf, file_size: usize, signature: Signature, offset: Option<usize>, base_address: u64) -> Self {
        let address = offset.map(|o| base_address.wrapping_add(o as u64));
        Self {
            file,
            file_size,
            signature,
            offset,
            address,
        }
    }

    pub fn found(&self) -> bool {
        self.offset.is_some()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ScanError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_base() {
        let sig = Signature::parse("01 ??").unwrap();
        let report = ScanReport::new(PathBuf::from("a.bin"), 16, sig, Some(4), 0x1000);
        assert!(report.found());
        assert_eq!(report.address, Some(0x1004));
    }

    #[test]
    fn test_not_found_has_no_address() {
        let sig = Signature::parse("01 ??").unwrap();
        let report = ScanReport::new(PathBuf::from("a.bin"), 16, sig, None, 0x1000);
        assert!(!report.found());
        assert_eq!(report.address, None);
    }

    #[test]
    fn test_json_shape() {
        let sig = Signature::parse("48 ?? 05").unwrap();
        let report = ScanReport::new(PathBuf::from("a.bin"), 3, sig.clone(), Some(0), 0);
        let json = report.to_json(false).unwrap();
        assert!(json.contains(r#""signature":"48 ?? 05""#));
        assert!(json.contains(r#""offset":0"#));

        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.signature, sig);
        assert_eq!(back.offset, Some(0));
    }
}
