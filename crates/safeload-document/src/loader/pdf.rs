use std::path::PathBuf;

use super::rfc3339;
use crate::{
    DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader, DocumentMetadata, LoadFuture,
    SourceLocation,
};

/// Extracts the text of a PDF file as one document. Eager loading only.
pub struct PdfLoader {
    pub path: PathBuf,
    pub max_file_size: u64,
}

impl PdfLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self) -> LoadFuture<'_> {
        let path = self.path.clone();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = std::fs::canonicalize(&path)?;

            let meta = tokio::fs::metadata(&path).await?;
            if meta.len() > max_size {
                return Err(DocumentError::FileTooLarge(meta.len()));
            }

            let mut metadata = DocumentMetadata::new(path.display().to_string(), "application/pdf");
            metadata.last_modified = meta.modified().ok().map(rfc3339);

            let content = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text(&path).map_err(|e| DocumentError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| DocumentError::Io(std::io::Error::other(e)))??;

            Ok(vec![Document::new(content, metadata)])
        })
    }

    fn source_location(&self) -> SourceLocation {
        SourceLocation::Path(self.path.clone())
    }
}
