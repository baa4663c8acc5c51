use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a dataset from an external flat file.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("data file '{}' is missing", path.display())]
    Missing { path: PathBuf },
    #[error("data file '{}' could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("data file '{}' has header {found:?}, expected {expected:?}", path.display())]
    SchemaMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("data file '{}' line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("node id '{id}' is declared more than once")]
    DuplicateNode { id: String },
    #[error("edge {source_id} -> {target_id} references unknown node '{missing}'")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },
}

impl DataSourceError {
    pub(crate) fn from_io(path: &std::path::Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            DataSourceError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            DataSourceError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Invalid filter input coming from the host page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("year range {lo}-{hi} is inverted")]
    InvertedRange { lo: i32, hi: i32 },
    #[error("cannot parse year range '{0}'")]
    BadRange(String),
}

/// Failure while turning a visual spec into an artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize visual spec: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("artifact io failed: {0}")]
    Io(#[from] io::Error),
}
