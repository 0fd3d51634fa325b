use std::path::Path;

use safeload_document::{DocumentLoader, SourceLocation};

/// Values that are labels rather than filesystem paths.
const SENTINELS: [&str; 3] = ["unknown", "-", "in-memory"];

/// Resolve a local relative path to absolute form. URIs, absolute paths and
/// sentinels are returned unchanged.
#[must_use]
pub fn full_path(path: &str) -> String {
    if path.is_empty()
        || path.contains("://")
        || path.starts_with('/')
        || Path::new(path).is_absolute()
        || SENTINELS.contains(&path)
    {
        return path.to_owned();
    }
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .map_or_else(|_| path.to_owned(), |p| p.display().to_string())
}

/// Absolute path or URI of the source a loader reads from, `-` when unknown.
#[must_use]
pub fn resolve_source_path<L: DocumentLoader + ?Sized>(loader: &L) -> String {
    let location = loader.source_location();
    if location == SourceLocation::Unknown {
        tracing::debug!(
            loader = loader.loader_name(),
            "loader exposes no source location"
        );
    }
    full_path(&location.location())
}
