//! Reader for FASTA index (.fai) files using noodles.
//!
//! FAI format provides name, length and byte offsets for each contig.
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use std::io::BufReader;
use std::path::{Path, PathBuf};

use noodles::fasta;

use crate::core::contig::Contig;
use crate::parsing::ParseError;
use crate::utils::validation::check_contig_limit;

/// Path of the side-car index samtools would write for `fasta_path`
pub fn default_index_path(fasta_path: &Path) -> PathBuf {
    let mut s = fasta_path.as_os_str().to_os_string();
    s.push(".fai");
    PathBuf::from(s)
}

/// Parse a FASTA index (.fai) file using noodles
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Noodles`
/// if parsing fails.
pub fn read_fai_file(path: &Path) -> Result<fasta::fai::Index, ParseError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;

    fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))
}

/// Convert a noodles FAI index to contigs with lengths
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the index has no contigs, or
/// `ParseError::TooManyContigs` if the limit is exceeded.
pub fn index_to_contigs(index: &fasta::fai::Index) -> Result<Vec<Contig>, ParseError> {
    let mut contigs = Vec::new();

    for record in index.as_ref() {
        // Check contig limit for DOS protection
        if check_contig_limit(contigs.len()).is_some() {
            return Err(ParseError::TooManyContigs(contigs.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        contigs.push(Contig::new(name).with_length(record.length()));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No contigs found in FAI index".to_string(),
        ));
    }

    Ok(contigs)
}
