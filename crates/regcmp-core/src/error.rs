use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the comparison tooling.
///
/// Per-token parse problems are not errors; see [`crate::ParseIssue`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("source file not found: {}", .0.display())]
    MissingSourceFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a canonical register identifier: {0:?} (expected x00..x31)")]
    InvalidRegister(String),
    #[error("invalid hint table: {0}")]
    HintTable(#[from] serde_json::Error),
    #[error("instruction image has {count} words but imem holds {capacity}")]
    ImemOverflow { count: usize, capacity: usize },
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a text source, mapping a missing path to [`Error::MissingSourceFile`].
pub(super) fn read_source(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingSourceFile(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}
