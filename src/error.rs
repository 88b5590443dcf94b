use std::path::PathBuf;

use thiserror::Error;

/// Library load/save errors
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Read error {0}")]
    Read(#[source] std::io::Error),
    #[error("Write error {0}")]
    Write(#[source] std::io::Error),
}
