// ChatCut - platform/fs.rs
//
// Filesystem-backed text source for hosts that import from disk.
// Memory-maps the export so large histories do not get copied twice, and
// decodes strictly — an export that is not UTF-8 must surface as a read
// failure, never as silently mangled text.

use super::{TextSource, TextSourceError};
use crate::util::constants::MAX_EXPORT_FILE_SIZE;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads one export file from disk.
pub struct FileTextSource {
    path: PathBuf,
    max_size: u64,
}

impl FileTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: MAX_EXPORT_FILE_SIZE,
        }
    }

    /// Override the size cap (tests, constrained hosts).
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileTextSource {
    fn read_text(&self) -> Result<String, TextSourceError> {
        let file = File::open(&self.path).map_err(|source| TextSourceError::Io { source })?;
        let size = file
            .metadata()
            .map_err(|source| TextSourceError::Io { source })?
            .len();

        if size > self.max_size {
            return Err(TextSourceError::TooLarge {
                size,
                max_size: self.max_size,
            });
        }
        if size == 0 {
            return Ok(String::new());
        }

        // Safety: the mapping is read-only and dropped before returning;
        // concurrent truncation of the export mid-import is outside the
        // single-user editing model.
        let mmap =
            unsafe { Mmap::map(&file) }.map_err(|source| TextSourceError::Io { source })?;
        let text =
            std::str::from_utf8(&mmap).map_err(|source| TextSourceError::Decode { source })?;
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.txt");
        std::fs::write(&path, "14:23\tたくや\tやあ\n").unwrap();

        let text = FileTextSource::new(&path).read_text().unwrap();
        assert!(text.contains("たくや"));
    }

    #[test]
    fn empty_file_reads_as_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        assert_eq!(FileTextSource::new(&path).read_text().unwrap(), "");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = FileTextSource::new("/nonexistent/chatcut-test/talk.txt").read_text();
        assert!(matches!(result, Err(TextSourceError::Io { .. })));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xFE, 0x00, 0x80]).unwrap();
        drop(file);

        let result = FileTextSource::new(&path).read_text();
        assert!(matches!(result, Err(TextSourceError::Decode { .. })));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "x".repeat(64)).unwrap();

        let result = FileTextSource::new(&path).with_max_size(16).read_text();
        assert!(matches!(result, Err(TextSourceError::TooLarge { .. })));
    }
}
