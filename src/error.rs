//! Errors raised while decoding, parsing and scanning result files.

use hdrhistogram::CreationError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Error returned by the decoders, the line parser and the directory scans.
///
/// Apart from [`Error::Io`] on the directory itself and [`Error::HistogramConfig`], these errors
/// are recoverable: the scans record them as [`ScanIssue`](crate::ScanIssue)s and carry on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed result file name {name:?}: no `{field}` field")]
    MalformedFilename { name: String, field: &'static str },

    #[error("unparsable line {line_no}: {line:?}")]
    UnparsableLine { line_no: usize, line: String },

    #[error("no `#C` runtime marker line")]
    MissingRuntimeMarker,

    #[error("directory contains no result files")]
    EmptyDirectory,

    #[error("result file is empty")]
    EmptyFile,

    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid histogram configuration")]
    HistogramConfig,

    #[error("unknown objective {0:?}; valid objectives are runtime, energy, edp, ed2p, mlups")]
    UnknownObjective(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<CreationError> for Error {
    fn from(_: CreationError) -> Self {
        Self::HistogramConfig
    }
}

pub type Result<T> = std::result::Result<T, Error>;
