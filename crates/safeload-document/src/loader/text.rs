use std::path::PathBuf;

use futures::stream;

use super::read_text_document;
use crate::{
    DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, DocumentStream, LoadFuture,
    SourceLocation,
};

/// Loads a single UTF-8 text or markdown file as one document.
pub struct TextLoader {
    pub path: PathBuf,
    pub max_file_size: u64,
}

impl TextLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for TextLoader {
    fn load(&self) -> LoadFuture<'_> {
        let path = self.path.clone();
        let max_size = self.max_file_size;
        Box::pin(async move { Ok(vec![read_text_document(path, max_size).await?]) })
    }

    fn lazy_load(&self) -> Result<DocumentStream<'_>, DocumentError> {
        let fut = read_text_document(self.path.clone(), self.max_file_size);
        Ok(Box::pin(stream::once(fut)))
    }

    fn source_location(&self) -> SourceLocation {
        SourceLocation::Path(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "hello world").unwrap();

        let docs = TextLoader::new(&file).load().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "hello world");
        assert_eq!(docs[0].metadata.content_type, "text/plain");
    }

    #[tokio::test]
    async fn load_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("readme.md");
        std::fs::write(&file, "# Title").unwrap();

        let docs = TextLoader::new(&file).load().await.unwrap();
        assert_eq!(docs[0].metadata.content_type, "text/markdown");
    }

    #[tokio::test]
    async fn load_nonexistent_file() {
        let result = TextLoader::new("/nonexistent/file.txt").load().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn metadata_source_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "data").unwrap();

        let docs = TextLoader::new(&file).load().await.unwrap();
        let canonical = std::fs::canonicalize(&file).unwrap();
        assert_eq!(docs[0].metadata.source, canonical.display().to_string());
    }

    #[tokio::test]
    async fn metadata_has_last_modified() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "data").unwrap();

        let docs = TextLoader::new(&file).load().await.unwrap();
        let stamp = docs[0].metadata.last_modified.as_deref().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[tokio::test]
    async fn file_too_large_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.txt");
        std::fs::write(&file, "x").unwrap();

        let loader = TextLoader {
            path: file,
            max_file_size: 0,
        };
        let result = loader.load().await;
        assert!(matches!(result, Err(DocumentError::FileTooLarge(_))));
    }

    #[tokio::test]
    async fn lazy_load_yields_single_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("test.txt");
        std::fs::write(&file, "lazy").unwrap();

        let loader = TextLoader::new(&file);
        let docs: Vec<_> = loader.lazy_load().unwrap().collect().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].as_ref().unwrap().content, "lazy");
    }

    #[test]
    fn source_location_is_path() {
        let loader = TextLoader::new("notes/a.txt");
        assert_eq!(
            loader.source_location(),
            SourceLocation::Path(PathBuf::from("notes/a.txt"))
        );
        assert_eq!(loader.loader_name(), "TextLoader");
    }
}
