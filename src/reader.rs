//! @dose
//! purpose: Reads a whole file into memory as UTF-8 text, ready for token counting.
//!
//! when-editing:
//!     - !Line endings are normalized to \n (universal newlines) before the text is returned
//!     - A missing path maps to Error::NotFound, everything else to Io or Decode
//!
//! invariants:
//!     - The file handle is released before read_file returns
//!     - A leading byte-order mark is preserved; it is part of the text
//!
//! gotchas:
//!     - Reading a directory is an Io error, not NotFound

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read `path` and return its contents decoded as UTF-8 with normalized newlines.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = String::from_utf8(bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "read file");

    if text.contains('\r') {
        return Ok(normalize_newlines(&text).into_owned());
    }
    Ok(text)
}

/// Translate `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello world").unwrap();

        assert_eq!(read_file(&path).unwrap(), "hello world");
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert_eq!(read_file(&path).unwrap(), "");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.txt");

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, Error::NotFound { path: p } if p == path));
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.bin");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_read_normalizes_crlf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("windows.txt");
        fs::write(&path, "one\r\ntwo\rthree\n").unwrap();

        assert_eq!(read_file(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_read_keeps_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}hi").unwrap();

        assert_eq!(read_file(&path).unwrap(), "\u{feff}hi");
    }

    #[test]
    fn test_normalize_newlines_borrows_when_clean() {
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("a\r\n\r\nb"), "a\n\nb");
    }
}
