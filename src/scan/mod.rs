// Sun Oct 18 2026 - Alex

pub mod error;
pub mod mmap;
pub mod report;

pub use error::ScanError;
pub use mmap::MappedFile;
pub use report::ScanReport;

use crate::config::Config;
use crate::pattern::Signature;
use std::path::Path;

/// Maps `path` and looks for the first occurrence of `signature`.
pub fn scan_file<P: AsRef<Path>>(path: P, signature: &Signature, config: &Config) -> Result<ScanReport, ScanError> {
    let mapped = MappedFile::open(path)?;
    let offset = mapped.find(signature);

    match offset {
        Some(o) => log::info!("Signature found at offset 0x{:x} in {}", o, mapped.path().display()),
        None => log::info!("Signature not found in {}", mapped.path().display()),
    }

    Ok(ScanReport::new(
        mapped.path().to_path_buf(),
        mapped.len(),
        signature.clone(),
        offset,
        config.base_address,
    ))
}
