use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::{Stream, StreamExt, stream};
use safeload_document::{Document, DocumentError, DocumentLoader};
use uuid::Uuid;

use crate::PLUGIN_VERSION;
use crate::client::ClassifierClient;
use crate::error::{ReportError, SafeLoaderError};
use crate::fs::file_owner;
use crate::loader_type::classify_loader_type;
use crate::payload::{App, DocRecord, DocReport, LoaderDetails, size_or_none};
use crate::runtime::{describe_framework, describe_runtime};
use crate::source::resolve_source_path;

/// Single-document batches produced by [`SafeLoader::lazy_load`].
pub type BatchStream<'a> =
    Pin<Box<dyn Stream<Item = Result<Vec<Document>, DocumentError>> + Send + 'a>>;

/// Wraps a [`DocumentLoader`] and reports every load to the classifier.
///
/// Reporting is best effort: delivery failures are logged and never change
/// what the caller receives.
pub struct SafeLoader<L> {
    loader: L,
    app: App,
    loader_details: LoaderDetails,
    source_owner: String,
    client: ClassifierClient,
    discover_sent: bool,
    loader_sent: AtomicBool,
}

impl<L: DocumentLoader> SafeLoader<L> {
    /// Wrap `loader` and register the app with the classifier.
    ///
    /// # Errors
    ///
    /// Returns [`SafeLoaderError::InvalidArgument`] if `app_id` or `owner` is blank.
    pub async fn new(
        loader: L,
        app_id: impl Into<String>,
        owner: impl Into<String>,
        description: Option<String>,
        client: ClassifierClient,
    ) -> Result<Self, SafeLoaderError> {
        let app_id = app_id.into();
        if app_id.trim().is_empty() {
            return Err(SafeLoaderError::InvalidArgument(
                "No app_id is passed or invalid app_id.",
            ));
        }
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(SafeLoaderError::InvalidArgument(
                "No owner is passed or invalid owner.",
            ));
        }

        let source_path = resolve_source_path(&loader);
        let source_owner = file_owner(&source_path);
        let loader_name = loader.loader_name().to_owned();
        let loader_details = LoaderDetails {
            source_type: classify_loader_type(&loader_name),
            source_size: size_or_none(&source_path),
            loader: loader_name,
            source_path,
        };

        let app = App {
            name: app_id,
            owner,
            description,
            load_id: Uuid::new_v4().to_string(),
            runtime: describe_runtime().await,
            framework: describe_framework(),
            plugin_version: PLUGIN_VERSION.to_owned(),
        };
        tracing::debug!(
            load_id = %app.load_id,
            loader = %loader_details.loader,
            source_path = %loader_details.source_path,
            source_type = %loader_details.source_type,
            "wrapping loader"
        );

        let mut safe = Self {
            loader,
            app,
            loader_details,
            source_owner,
            client,
            discover_sent: false,
            loader_sent: AtomicBool::new(false),
        };
        safe.send_discover().await;
        Ok(safe)
    }

    /// Load every document, then send one terminal report covering them.
    ///
    /// # Errors
    ///
    /// Returns [`SafeLoaderError::Document`] if the wrapped loader fails.
    pub async fn load(&self) -> Result<Vec<Document>, SafeLoaderError> {
        let docs = self.loader.load().await?;
        self.send_loader_doc(&docs, true).await;
        Ok(docs)
    }

    /// Stream single-document batches, reporting each before it is yielded.
    ///
    /// After the wrapped stream ends a terminal report with no documents is
    /// sent. Item errors from the wrapped loader are passed through unreported.
    ///
    /// # Errors
    ///
    /// Returns [`SafeLoaderError::LazyLoadUnsupported`] if the wrapped loader
    /// cannot load lazily.
    pub fn lazy_load(&self) -> Result<BatchStream<'_>, SafeLoaderError> {
        let docs = match self.loader.lazy_load() {
            Ok(docs) => docs,
            Err(DocumentError::LazyLoadUnsupported(loader)) => {
                tracing::error!("{loader} does not implement lazy_load()");
                return Err(SafeLoaderError::LazyLoadUnsupported(loader));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Box::pin(stream::unfold(docs, move |mut docs| async move {
            match docs.next().await {
                Some(Ok(doc)) => {
                    let batch = vec![doc];
                    self.send_loader_doc(&batch, false).await;
                    Some((Ok(batch), docs))
                }
                Some(Err(e)) => Some((Err(e), docs)),
                None => {
                    self.send_loader_doc(&[], true).await;
                    None
                }
            }
        })))
    }

    async fn send_discover(&mut self) {
        match self.client.send_discover(&self.app).await {
            Ok(status) => {
                tracing::debug!(%status, load_id = %self.app.load_id, "app discovered");
                self.discover_sent = true;
            }
            Err(ReportError::UnexpectedStatus { status, .. }) => {
                tracing::debug!("Received unexpected HTTP response code: {status}");
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.client.base_url(),
                    "discover report failed: {e}"
                );
            }
        }
    }

    async fn send_loader_doc(&self, docs: &[Document], loading_end: bool) {
        let report = DocReport {
            name: &self.app.name,
            owner: &self.app.owner,
            docs: docs.iter().map(DocRecord::from_document).collect(),
            plugin_version: PLUGIN_VERSION,
            load_id: &self.app.load_id,
            loader_details: &self.loader_details,
            loading_end,
            source_owner: &self.source_owner,
        };
        match self.client.send_loader_doc(&report).await {
            Ok(()) => {
                tracing::debug!(docs = docs.len(), loading_end, "loader/doc reported");
            }
            Err(e @ (ReportError::Http(_) | ReportError::UnexpectedStatus { .. })) => {
                tracing::debug!(url = %self.client.base_url(), "loader/doc report failed: {e}");
            }
            Err(e) => tracing::warn!("loader/doc report failed: {e}"),
        }
        if loading_end {
            self.loader_sent.store(true, Ordering::Relaxed);
        }
    }
}

impl<L> SafeLoader<L> {
    /// Identifier correlating every report from this wrapper.
    #[must_use]
    pub fn load_id(&self) -> &str {
        &self.app.load_id
    }

    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[must_use]
    pub fn loader_details(&self) -> &LoaderDetails {
        &self.loader_details
    }

    #[must_use]
    pub fn source_owner(&self) -> &str {
        &self.source_owner
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.loader
    }

    /// Whether the classifier acknowledged app discovery.
    #[must_use]
    pub fn discover_sent(&self) -> bool {
        self.discover_sent
    }

    /// Whether a terminal `loader/doc` report has been attempted.
    #[must_use]
    pub fn loader_sent(&self) -> bool {
        self.loader_sent.load(Ordering::Relaxed)
    }
}
