// ---------------------------------------------------------------------------
// LoadError: failures of the startup data load
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that abort startup. Any of these leaves the map unrendered and is
/// shown to the user as a blocking alert; there is no retry.
#[derive(Debug)]
pub enum LoadError {
    /// Reading a local file failed.
    Io { path: String, source: std::io::Error },
    /// The server answered with a non-success status.
    Http { status: u16, url: String },
    /// The request itself failed (network error, bad response body).
    Fetch(String),
    /// The boundary file is not a GeoJSON feature collection.
    Boundaries(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "Failed to load {path}: {source}"),
            LoadError::Http { status, url } => {
                write!(f, "Failed to load {url}. Status: {status}")
            }
            LoadError::Fetch(msg) => write!(f, "Fetch failed: {msg}"),
            LoadError::Boundaries(msg) => write!(f, "Invalid boundary data: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
