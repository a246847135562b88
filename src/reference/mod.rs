//! Reference sequence lookups.
//!
//! [`ReferenceLookup`] answers "which bases does the reference carry at this
//! coordinate". Coordinates are 1-based and inclusive, as in VCF POS; the
//! implementations read the 0-based half-open interval
//! `[position - 1, position - 1 + len)`.
//!
//! Two implementations are provided:
//!
//! - [`IndexedReference`]: random access into an uncompressed FASTA through a
//!   `.fai` index (read from disk if present, otherwise built in memory)
//! - [`InMemoryReference`]: whole sequences held in memory, used for
//!   gzip-compressed FASTA files and in tests
//!
//! Contig names are matched exactly; no aliasing is applied here.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::contig::Contig;
use crate::parsing::fasta::is_fasta_file;
use crate::parsing::{is_gzipped, ParseError};

pub mod indexed;
pub mod memory;

pub use indexed::IndexedReference;
pub use memory::InMemoryReference;

/// Failure to fetch bases for a single coordinate
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("unknown contig: {0}")]
    UnknownContig(String),

    #[error("position {position} is outside contig {contig} (length {length})")]
    PositionOutOfBounds {
        contig: String,
        position: u64,
        length: u64,
    },

    #[error("failed to read reference: {0}")]
    Io(#[from] io::Error),
}

/// Failure to open the reference as a whole
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference file not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a FASTA file (expected .fa, .fasta or .fna, optionally .gz): {0}")]
    NotFasta(PathBuf),

    #[error("Failed to read reference: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read-only access to reference bases, safe to share between threads
pub trait ReferenceLookup: Send + Sync {
    /// Contigs present in the reference, in file order
    fn contigs(&self) -> &[Contig];

    /// Bases covering `len` positions starting at 1-based `position`,
    /// upper-cased. Intervals running past the contig end are truncated.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownContig` if the contig is not in the
    /// reference, `LookupError::PositionOutOfBounds` if `position` is 0 or past
    /// the contig end, or `LookupError::Io` if reading fails.
    fn fetch(&self, chromosome: &str, position: u64, len: usize) -> Result<String, LookupError>;

    /// The single reference base at 1-based `position`
    ///
    /// # Errors
    ///
    /// See [`ReferenceLookup::fetch`].
    fn lookup(&self, chromosome: &str, position: u64) -> Result<String, LookupError> {
        self.fetch(chromosome, position, 1)
    }
}

/// Open a FASTA reference with the best available lookup strategy
///
/// # Errors
///
/// Returns `ReferenceError::NotFound` or `ReferenceError::NotFasta` for an
/// unusable path, or any error raised while indexing/reading the FASTA.
pub fn open_reference(path: &Path) -> Result<Box<dyn ReferenceLookup>, ReferenceError> {
    if !path.is_file() {
        return Err(ReferenceError::NotFound(path.to_path_buf()));
    }
    if !is_fasta_file(path) {
        return Err(ReferenceError::NotFasta(path.to_path_buf()));
    }

    if is_gzipped(path) {
        debug!("Loading compressed reference {} into memory", path.display());
        Ok(Box::new(InMemoryReference::from_fasta_file(path)?))
    } else {
        Ok(Box::new(IndexedReference::open(path)?))
    }
}

/// Resolve a lookup request to a 1-based inclusive interval within a contig
/// of `length` bases
pub(crate) fn resolve_interval(
    chromosome: &str,
    position: u64,
    len: usize,
    length: u64,
) -> Result<(u64, u64), LookupError> {
    if position == 0 || position > length {
        return Err(LookupError::PositionOutOfBounds {
            contig: chromosome.to_string(),
            position,
            length,
        });
    }
    let span = u64::try_from(len.max(1)).unwrap_or(u64::MAX);
    let end = position.saturating_add(span - 1).min(length);
    Ok((position, end))
}
