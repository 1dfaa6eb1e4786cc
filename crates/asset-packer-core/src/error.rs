//! Error types for the asset-packer-core library.
//!
//! Every failure is fatal for a single conversion; the variants exist so the
//! caller can report a precise message and pick the right exit path.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for asset-packer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all asset-packer operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open the input file
    #[error("failed to open input file '{path}': {source}")]
    InputOpen {
        /// Path to the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file
    #[error("failed to create output file '{path}': {source}")]
    OutputCreate {
        /// Path to the output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The namespace derived from the output path is empty
    #[error("cannot derive a namespace name from '{path}': file name is empty")]
    EmptyNamespace {
        /// The output path the namespace was derived from
        path: PathBuf,
    },

    /// The output path names the input file itself
    #[error("output '{path}' would overwrite the input file")]
    SameInputOutput {
        /// The path shared by input and output
        path: PathBuf,
    },

    /// Path is not valid UTF-8 and cannot be turned into a namespace
    #[error("path '{path}' is not valid UTF-8")]
    NonUtf8Path {
        /// The offending path
        path: PathBuf,
    },
}

impl Error {
    /// Creates a new input open error
    pub fn input_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Creates a new output create error
    pub fn output_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new empty namespace error
    pub fn empty_namespace(path: impl Into<PathBuf>) -> Self {
        Self::EmptyNamespace { path: path.into() }
    }

    /// Creates a new same input/output error
    pub fn same_input_output(path: impl Into<PathBuf>) -> Self {
        Self::SameInputOutput { path: path.into() }
    }

    /// Creates a new non-UTF-8 path error
    pub fn non_utf8_path(path: impl Into<PathBuf>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }

    /// Returns true if the error stems from the paths given on the command
    /// line rather than from the filesystem
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyNamespace { .. } | Self::SameInputOutput { .. } | Self::NonUtf8Path { .. }
        )
    }
}
