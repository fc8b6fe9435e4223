//! PDF uploads for question papers and notes.
//!
//! Files land in `<root>/papers/` or `<root>/notes/` under a fresh UUID name
//! that keeps the original extension. The returned URL is what gets stored in
//! the record's `fileUrl` and is served from `/uploads`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::constants::uploads::{NOTES_DIR, PAPERS_DIR, PDF_MIME};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only PDF files are allowed")]
    NotPdf,

    #[error("File exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Paper,
    Note,
}

impl UploadKind {
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Paper => PAPERS_DIR,
            Self::Note => NOTES_DIR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadService {
    root: PathBuf,
    max_file_size: u64,
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub async fn ensure_dirs(&self) -> Result<(), UploadError> {
        for kind in [UploadKind::Paper, UploadKind::Note] {
            tokio::fs::create_dir_all(self.root.join(kind.dir_name())).await?;
        }
        Ok(())
    }

    /// Validates and writes one uploaded PDF, returning its public URL.
    pub async fn save_pdf(
        &self,
        kind: UploadKind,
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if content_type != Some(PDF_MIME) {
            return Err(UploadError::NotPdf);
        }

        if bytes.len() as u64 > self.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }

        let file_name = format!(
            "{}{}",
            uuid::Uuid::new_v4(),
            original_name.map(extension_of).unwrap_or_default()
        );

        let dir = self.root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        info!(
            kind = kind.dir_name(),
            file = %file_name,
            size = bytes.len(),
            "Stored upload"
        );

        Ok(format!("/uploads/{}/{file_name}", kind.dir_name()))
    }
}

/// `.ext` of a client file name, or empty when it has none usable.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
