// ---------------------------------------------------------------------------
// ExportError: failures while producing or delivering the CSV export
// ---------------------------------------------------------------------------

use std::fmt;

#[derive(Debug)]
pub enum ExportError {
    /// Writing the file failed (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The CSV writer failed.
    Csv(String),
    /// The browser refused to create or trigger the download.
    Download(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "I/O error: {e}"),
            ExportError::Csv(msg) => write!(f, "CSV error: {msg}"),
            ExportError::Download(msg) => write!(f, "Download failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e.to_string())
    }
}
