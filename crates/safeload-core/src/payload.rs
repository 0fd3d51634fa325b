//! Request bodies for the classifier endpoints.

use safeload_document::Document;
use serde::{Serialize, Serializer};

use crate::fs::{file_owner, source_size};
use crate::loader_type::LoaderType;
use crate::runtime::{Framework, Runtime};
use crate::source::full_path;

/// App registration sent once to `app/discover`.
#[derive(Debug, Clone, Serialize)]
pub struct App {
    pub name: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub load_id: String,
    pub runtime: Runtime,
    pub framework: Framework,
    pub plugin_version: String,
}

/// What the wrapped loader reads from, computed once per wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderDetails {
    pub loader: String,
    pub source_path: String,
    pub source_type: LoaderType,
    /// `None` when the source is not a local file or directory.
    pub source_size: Option<u64>,
}

/// One loaded document as reported to `loader/doc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    pub doc: String,
    pub source_path: String,
    pub last_modified: Option<String>,
    pub file_owner: String,
    pub source_size: Option<u64>,
}

impl DocRecord {
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        let source_path = full_path(&document.metadata.source);
        Self {
            doc: document.content.clone(),
            file_owner: file_owner(&source_path),
            source_size: size_or_none(&source_path),
            last_modified: document.metadata.last_modified.clone(),
            source_path,
        }
    }
}

/// Batch report sent to `loader/doc`.
#[derive(Debug, Serialize)]
pub struct DocReport<'a> {
    pub name: &'a str,
    pub owner: &'a str,
    pub docs: Vec<DocRecord>,
    pub plugin_version: &'a str,
    pub load_id: &'a str,
    pub loader_details: &'a LoaderDetails,
    #[serde(serialize_with = "serialize_flag")]
    pub loading_end: bool,
    pub source_owner: &'a str,
}

/// The classifier expects `"true"`/`"false"` strings rather than JSON booleans.
fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "true" } else { "false" })
}

pub(crate) fn size_or_none(path: &str) -> Option<u64> {
    match source_size(path) {
        Ok(size) => Some(size),
        Err(e) => {
            tracing::debug!(path, "source size unavailable: {e}");
            None
        }
    }
}
