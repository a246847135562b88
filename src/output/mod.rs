//! Assembling and writing the reconciled VCF.
//!
//! - [`Assembler`]: undoes the store's normalizations and applies the header
//!   sentence replacement
//! - [`writer`]: bgzip compression and tabix indexing
//! - [`Workspace`]: scoped scratch directory; the output and its index are only
//!   moved into place once both are complete

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod assembler;
pub mod workspace;
pub mod writer;

pub use assembler::Assembler;
pub use workspace::Workspace;

/// Extension appended to the output path for its tabix index
pub const TABIX_EXTENSION: &str = "tbi";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("Cannot create scratch workspace in {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to index {path}: {source}")]
    Index {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Path of the tabix index written next to `output`
#[must_use]
pub fn index_path(output: &std::path::Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".");
    name.push(TABIX_EXTENSION);
    PathBuf::from(name)
}
