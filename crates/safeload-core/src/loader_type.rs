//! Static loader classification tables.

use std::fmt;

use serde::Serialize;

pub const FILE_LOADERS: &[&str] = &[
    "JSONLoader",
    "S3FileLoader",
    "UnstructuredMarkdownLoader",
    "UnstructuredPDFLoader",
    "UnstructuredFileLoader",
    "UnstructuredJsonLoader",
    "PyPDFLoader",
    "GCSFileLoader",
    "AmazonTextractPDFLoader",
    "CSVLoader",
    "UnstructuredExcelLoader",
    "UnstructuredEmailLoader",
    "TextLoader",
    "PdfLoader",
];

pub const DIR_LOADERS: &[&str] = &[
    "DirectoryLoader",
    "S3DirLoader",
    "SlackDirectoryLoader",
    "PyPDFDirectoryLoader",
    "NotionDirectoryLoader",
];

pub const IN_MEMORY_LOADERS: &[&str] = &["DataFrameLoader", "InMemoryLoader"];

pub const REMOTE_DB_LOADERS: &[&str] = &["NotionDBLoader", "GoogleDriveLoader"];

/// Lookup order for [`classify_loader_type`].
const LOADER_TYPE_TABLES: [(LoaderType, &[&str]); 4] = [
    (LoaderType::File, FILE_LOADERS),
    (LoaderType::Dir, DIR_LOADERS),
    (LoaderType::InMemory, IN_MEMORY_LOADERS),
    (LoaderType::RemoteDb, REMOTE_DB_LOADERS),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoaderType {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Dir,
    #[serde(rename = "in-memory")]
    InMemory,
    #[serde(rename = "remote_db")]
    RemoteDb,
    #[serde(rename = "unknown")]
    Unknown,
}

impl LoaderType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::InMemory => "in-memory",
            Self::RemoteDb => "remote_db",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a loader by exact name. Names in no table are [`LoaderType::Unknown`].
#[must_use]
pub fn classify_loader_type(loader_name: &str) -> LoaderType {
    LOADER_TYPE_TABLES
        .iter()
        .find(|(_, names)| names.contains(&loader_name))
        .map_or(LoaderType::Unknown, |(kind, _)| *kind)
}

/// Every loader name present in a classification table.
pub fn supported_loaders() -> impl Iterator<Item = &'static str> {
    LOADER_TYPE_TABLES
        .iter()
        .flat_map(|(_, names)| names.iter().copied())
}

#[must_use]
pub fn is_supported_loader(loader_name: &str) -> bool {
    classify_loader_type(loader_name) != LoaderType::Unknown
}
