//! Per-request upload spooling.
//!
//! Each upload is written to `<spool_dir>/<uuid>_<sanitized name>` and
//! deleted when the handle drops, so concurrent uploads sharing an original
//! filename never collide and nothing accumulates across requests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use remitex_core::RemitexError;
use tracing::{debug, warn};
use uuid::Uuid;

/// A spooled upload on disk. The file is removed when this drops.
#[derive(Debug)]
pub struct SpooledUpload {
    path: PathBuf,
}

impl SpooledUpload {
    /// Write `bytes` to a fresh file under `spool_dir`.
    ///
    /// The original filename only contributes a sanitized suffix for
    /// debuggability; uniqueness comes from the uuid prefix.
    pub fn write(spool_dir: &Path, original_filename: &str, bytes: &[u8]) -> Result<Self> {
        fs::create_dir_all(spool_dir)
            .with_context(|| format!("failed to create spool dir {}", spool_dir.display()))?;

        let name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
        let path = spool_dir.join(name);
        fs::write(&path, bytes)
            .with_context(|| format!("failed to spool upload to {}", path.display()))?;

        debug!(path = %path.display(), size = bytes.len(), "Spooled upload");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SpooledUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove spooled upload");
        }
    }
}

/// Reduce an untrusted filename to a safe suffix: strip any directory
/// components, keep `[A-Za-z0-9._-]`, replace everything else with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // A name made entirely of separators sanitizes to nothing.
    if cleaned.trim_matches('.').is_empty() {
        "upload.bin".to_string()
    } else {
        cleaned
    }
}

/// Validate that the upload looks like a PDF before it is spooled.
pub fn require_pdf(filename: &str, bytes: &[u8]) -> Result<(), RemitexError> {
    if bytes.is_empty() {
        return Err(RemitexError::UploadRejected("empty upload body".into()));
    }
    if !crate::pdf::is_pdf(bytes) {
        return Err(RemitexError::UploadRejected(format!(
            "{filename:?} is not a PDF document"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("advice.pdf"), "advice.pdf");
    }

    #[test]
    fn sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize_filename("pay advice (july).pdf"), "pay_advice__july_.pdf");
        assert_eq!(sanitize_filename("a\0b.pdf"), "a_b.pdf");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_filename(""), "upload.bin");
        assert_eq!(sanitize_filename("../.."), "upload.bin");
    }

    #[test]
    fn spool_paths_are_unique_per_upload() {
        let dir = tempfile::tempdir().unwrap();
        let a = SpooledUpload::write(dir.path(), "same.pdf", b"%PDF-1.4 a").unwrap();
        let b = SpooledUpload::write(dir.path(), "same.pdf", b"%PDF-1.4 b").unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().exists());
        assert!(b.path().exists());
    }

    #[test]
    fn spooled_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let spooled = SpooledUpload::write(dir.path(), "advice.pdf", b"%PDF-1.4").unwrap();
            spooled.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn require_pdf_rejects_empty_and_non_pdf() {
        assert!(require_pdf("a.pdf", b"").is_err());
        assert!(require_pdf("a.pdf", b"hello world").is_err());
        assert!(require_pdf("a.pdf", b"%PDF-1.7 ...").is_ok());
    }
}
