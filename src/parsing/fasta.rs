//! Reader for FASTA files using noodles.
//!
//! Loads whole sequences for the in-memory reference lookup. Supports both
//! uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::BufRead;
use std::path::Path;

use noodles::fasta;

use crate::parsing::{open_text_reader, ParseError};
use crate::utils::validation::check_contig_limit;

/// One named sequence from a FASTA file, upper-cased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaSequence {
    pub name: String,
    pub sequence: Vec<u8>,
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Read every sequence of a FASTA file into memory.
///
/// Sequences are upper-cased so soft-masked bases compare like hard-masked ones.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyContigs` if the limit is exceeded.
pub fn read_fasta_file(path: &Path) -> Result<Vec<FastaSequence>, ParseError> {
    let reader = open_text_reader(path)?;
    let mut fasta_reader = fasta::io::Reader::new(reader);
    read_fasta_sequences(&mut fasta_reader)
}

/// Read every sequence from a noodles FASTA reader
fn read_fasta_sequences<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<FastaSequence>, ParseError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check contig limit for DOS protection
        if check_contig_limit(sequences.len()).is_some() {
            return Err(ParseError::TooManyContigs(sequences.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = record
            .sequence()
            .as_ref()
            .iter()
            .map(u8::to_ascii_uppercase)
            .collect();

        sequences.push(FastaSequence { name, sequence });
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.fna")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("test.fasta.gz")));
        assert!(is_fasta_file(Path::new("test.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FA")));

        assert!(!is_fasta_file(Path::new("test.vcf")));
        assert!(!is_fasta_file(Path::new("test.vcf.gz")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_read_fasta_file() {
        let fasta_content = b">chr1 description\nACGTacgt\nACGT\n>chr2\nGGGG\n";

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(fasta_content).unwrap();
        temp.flush().unwrap();

        let sequences = read_fasta_file(temp.path()).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].name, "chr1");
        assert_eq!(sequences[0].sequence, b"ACGTACGTACGT".to_vec());
        assert_eq!(sequences[1].name, "chr2");
        assert_eq!(sequences[1].sequence, b"GGGG".to_vec());
    }

    #[test]
    fn test_read_gzipped_fasta_file() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">1\nTTAA\n").unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&encoder.finish().unwrap()).unwrap();
        temp.flush().unwrap();

        let sequences = read_fasta_file(temp.path()).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].sequence, b"TTAA".to_vec());
    }

    #[test]
    fn test_read_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        let result = read_fasta_file(temp.path());
        assert!(result.is_err());
    }
}
