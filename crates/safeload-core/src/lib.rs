//! Wraps document loaders and reports what they load to a classification service.

pub mod client;
pub mod config;
pub mod error;
pub mod fs;
pub mod loader_type;
pub mod payload;
pub mod runtime;
pub mod safe_loader;
pub mod source;

pub use client::ClassifierClient;
pub use config::{ClassifierConfig, Config};
pub use error::{ReportError, SafeLoaderError, SourceSizeError};
pub use fs::{file_owner, source_size};
pub use loader_type::{LoaderType, classify_loader_type, is_supported_loader};
pub use payload::{App, DocRecord, DocReport, LoaderDetails};
pub use runtime::{Framework, Runtime, describe_framework, describe_runtime};
pub use safe_loader::{BatchStream, SafeLoader};
pub use source::{full_path, resolve_source_path};

/// Version sent with every report.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
