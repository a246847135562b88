//! Decoders for the two input formats.
//!
//! - **VCF files**: header block, `##contig` declarations and data lines
//! - **FASTA files**: sequences for in-memory reference lookups
//! - **FASTA index (.fai) files**: contig names and lengths
//!
//! Plain text and gzip/bgzip compressed inputs are both accepted; compression
//! is detected from the file extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_reconcile::parsing::vcf::read_vcf_file;
//! use std::path::Path;
//!
//! let vcf = read_vcf_file(Path::new("calls.vcf.gz")).unwrap();
//! println!("{} records, {} contigs", vcf.records.len(), vcf.header.contigs.len());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod fai;
pub mod fasta;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file for buffered reading, decompressing gzip/bgzip input.
///
/// bgzip files are concatenated gzip members, so a multi-member decoder is
/// used for both.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_text_reader(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
