use std::path::PathBuf;

use futures::{StreamExt, stream};
use walkdir::WalkDir;

use super::{TEXT_EXTENSIONS, read_text_document};
use crate::{
    DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, DocumentStream, LoadFuture,
    SourceLocation,
};

/// Loads every text file under a directory, one document per file.
pub struct DirectoryLoader {
    pub path: PathBuf,
    pub recursive: bool,
    pub max_file_size: u64,
}

impl DirectoryLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Matching files in file-name order.
    fn collect_files(&self) -> Result<Vec<PathBuf>, DocumentError> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.path)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let supported = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
            if supported {
                files.push(entry.into_path());
            } else {
                tracing::debug!(path = %entry.path().display(), "skipping unsupported file");
            }
        }
        Ok(files)
    }
}

impl DocumentLoader for DirectoryLoader {
    fn load(&self) -> LoadFuture<'_> {
        Box::pin(async move {
            let files = self.collect_files()?;
            let mut docs = Vec::with_capacity(files.len());
            for file in files {
                docs.push(read_text_document(file, self.max_file_size).await?);
            }
            Ok(docs)
        })
    }

    fn lazy_load(&self) -> Result<DocumentStream<'_>, DocumentError> {
        let files = self.collect_files()?;
        let max_size = self.max_file_size;
        Ok(Box::pin(
            stream::iter(files).then(move |file| read_text_document(file, max_size)),
        ))
    }

    fn source_location(&self) -> SourceLocation {
        SourceLocation::Path(self.path.clone())
    }
}
