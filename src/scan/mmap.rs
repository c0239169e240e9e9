// Sun Oct 18 2026 - Alex

use crate::pattern::{find_signature, Signature};
use crate::scan::ScanError;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read-only view of a file's bytes, used as the haystack for a scan.
pub struct MappedFile {
    mmap: Mmap,
    path: PathBuf,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }?;
        log::debug!("Mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(Self {
            mmap,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_ref()
    }

    pub fn find(&self, signature: &Signature) -> Option<usize> {
        find_signature(signature, self.as_slice())
    }
}
