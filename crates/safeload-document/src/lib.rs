//! Document types, the loader capability trait, and built-in loaders.

pub mod error;
pub mod loader;
pub mod source;
pub mod types;

pub use error::DocumentError;
pub use loader::{DirectoryLoader, InMemoryLoader, TextLoader};
pub use source::{ObjectStore, SourceLocation};
pub use types::{Document, DocumentMetadata};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

use std::future::Future;
use std::pin::Pin;

use futures::Stream;

/// Name reported as the loading framework in app discovery.
pub const FRAMEWORK_NAME: &str = env!("CARGO_PKG_NAME");

/// Version reported as the loading framework in app discovery.
pub const FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

pub type LoadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Document>, DocumentError>> + Send + 'a>>;

pub type DocumentStream<'a> =
    Pin<Box<dyn Stream<Item = Result<Document, DocumentError>> + Send + 'a>>;

/// A component producing [`Document`]s from some source.
pub trait DocumentLoader: Send + Sync {
    /// Load every document eagerly.
    fn load(&self) -> LoadFuture<'_>;

    /// Yield documents one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::LazyLoadUnsupported`] unless the loader overrides this.
    fn lazy_load(&self) -> Result<DocumentStream<'_>, DocumentError> {
        Err(DocumentError::LazyLoadUnsupported(self.loader_name().to_owned()))
    }

    /// Short type name used to classify the loader, e.g. `TextLoader`.
    fn loader_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Where this loader reads from.
    fn source_location(&self) -> SourceLocation {
        SourceLocation::Unknown
    }
}

impl<T: DocumentLoader + ?Sized> DocumentLoader for Box<T> {
    fn load(&self) -> LoadFuture<'_> {
        (**self).load()
    }

    fn lazy_load(&self) -> Result<DocumentStream<'_>, DocumentError> {
        (**self).lazy_load()
    }

    fn loader_name(&self) -> &str {
        (**self).loader_name()
    }

    fn source_location(&self) -> SourceLocation {
        (**self).source_location()
    }
}

/// Strip module path and generic arguments from a fully qualified type name.
#[must_use]
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
