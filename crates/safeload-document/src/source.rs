//! Source locations a loader can expose for auditing.

use std::fmt;
use std::path::PathBuf;

/// Placeholder location for loaders that expose nothing recognizable.
pub const UNKNOWN_LOCATION: &str = "-";

/// Location reported by loaders whose data lives only in process memory.
pub const IN_MEMORY_LOCATION: &str = "in-memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStore {
    Gcs,
    S3,
}

impl ObjectStore {
    #[must_use]
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Gcs => "gc",
            Self::S3 => "s3",
        }
    }
}

/// Where a loader reads its documents from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// An object in a cloud bucket.
    CloudObject {
        store: ObjectStore,
        bucket: String,
        key: String,
    },
    /// A free-form source identifier, optionally narrowed by a channel.
    Source {
        source: String,
        channel: Option<String>,
    },
    /// A local file or directory.
    Path(PathBuf),
    /// Web pages; only the first one is reported.
    Web(Vec<String>),
    InMemory,
    /// A database in a hosted service, e.g. `notiondb`.
    RemoteDb { scheme: String, database_id: String },
    Unknown,
}

impl SourceLocation {
    /// Render the location as a path or URI. Relative paths are returned as-is.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::CloudObject { store, bucket, key } => {
                format!("{}://{bucket}/{key}", store.scheme())
            }
            Self::Source { source, channel } => match channel {
                Some(channel) => format!("{source}/{channel}"),
                None => source.clone(),
            },
            Self::Path(path) => path.display().to_string(),
            Self::Web(urls) => urls
                .first()
                .cloned()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned()),
            Self::InMemory => IN_MEMORY_LOCATION.to_owned(),
            Self::RemoteDb {
                scheme,
                database_id,
            } => format!("{scheme}://{database_id}"),
            Self::Unknown => UNKNOWN_LOCATION.to_owned(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}
