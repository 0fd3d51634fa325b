mod directory;
mod memory;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

pub use directory::DirectoryLoader;
pub use memory::InMemoryLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
pub use text::TextLoader;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{Document, DocumentError, DocumentMetadata};

/// Extensions read as UTF-8 text by [`TextLoader`] and [`DirectoryLoader`].
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "md" | "markdown" => "text/markdown",
        _ => "text/plain",
    }
}

fn rfc3339(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Utc>::from(time).to_rfc3339()
}

async fn read_text_document(path: PathBuf, max_size: u64) -> Result<Document, DocumentError> {
    let path = std::fs::canonicalize(&path)?;

    let meta = tokio::fs::metadata(&path).await?;
    if meta.len() > max_size {
        return Err(DocumentError::FileTooLarge(meta.len()));
    }

    let content = tokio::fs::read_to_string(&path).await?;

    let mut metadata = DocumentMetadata::new(path.display().to_string(), content_type_for(&path));
    metadata.last_modified = meta.modified().ok().map(rfc3339);
    Ok(Document::new(content, metadata))
}
