// Sun Oct 18 2026 - Alex

pub mod config;
pub mod pattern;
pub mod scan;

pub use config::{Config, ConfigOverrides, OutputFormat};
pub use pattern::{PatternError, Signature};
pub use scan::{scan_file, MappedFile, ScanError, ScanReport};
