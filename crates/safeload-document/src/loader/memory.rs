use futures::stream;

use crate::source::IN_MEMORY_LOCATION;
use crate::{
    Document, DocumentError, DocumentLoader, DocumentMetadata, DocumentStream, LoadFuture,
    SourceLocation,
};

/// Serves documents from strings already held in memory.
pub struct InMemoryLoader {
    texts: Vec<String>,
}

impl InMemoryLoader {
    #[must_use]
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    fn documents(&self) -> impl Iterator<Item = Document> + '_ {
        self.texts.iter().map(|text| {
            Document::new(
                text.clone(),
                DocumentMetadata::new(IN_MEMORY_LOCATION, "text/plain"),
            )
        })
    }
}

impl DocumentLoader for InMemoryLoader {
    fn load(&self) -> LoadFuture<'_> {
        let docs: Vec<Document> = self.documents().collect();
        Box::pin(async move { Ok(docs) })
    }

    fn lazy_load(&self) -> Result<DocumentStream<'_>, DocumentError> {
        Ok(Box::pin(stream::iter(self.documents().map(Ok))))
    }

    fn source_location(&self) -> SourceLocation {
        SourceLocation::InMemory
    }
}
