//! Decoder for VCF header blocks and data lines.
//!
//! VCF files have contig definitions in the header as:
//! `##contig=<ID=chr1,length=248956422>`
//!
//! Other fields such as `md5` or `assembly` may be present and are ignored.
//!
//! Data lines are split on tabs into the five columns reconciliation needs
//! (CHROM, POS, ID, REF, ALT) and an opaque remainder. Parsing is done by hand
//! rather than through noodles so that every byte outside REF/ALT is written
//! back exactly as it was read.

use std::io::BufRead;
use std::path::Path;

use crate::core::contig::Contig;
use crate::core::header::HeaderBlock;
use crate::core::record::VariantRecord;
use crate::parsing::{open_text_reader, ParseError};
use crate::utils::validation::{check_contig_limit, is_valid_allele};

/// Minimum number of tab-separated columns in a data line
pub const MIN_RECORD_COLUMNS: usize = 5;

/// A VCF decoded into its header block and records, in file order
#[derive(Debug, Clone)]
pub struct DecodedVcf {
    pub header: HeaderBlock,
    pub records: Vec<VariantRecord>,
}

/// Read and decode a VCF file (plain, gzip or bgzip)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`read_vcf`].
pub fn read_vcf_file(path: &Path) -> Result<DecodedVcf, ParseError> {
    let reader = open_text_reader(path)?;
    read_vcf(reader)
}

/// Decode a VCF from a buffered reader
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the `#CHROM` line or all `##contig`
/// declarations are missing, `ParseError::InvalidRecord` for a malformed data
/// line, or `ParseError::TooManyContigs` if the contig limit is exceeded.
pub fn read_vcf<R: BufRead>(reader: R) -> Result<DecodedVcf, ParseError> {
    let mut header_lines = Vec::new();
    let mut contigs = Vec::new();
    let mut records = Vec::new();
    let mut in_header = true;
    let mut crlf = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        // The first line decides the terminator written back
        let stripped = line.strip_suffix('\r');
        crlf.get_or_insert(stripped.is_some());
        let line = stripped.unwrap_or(&line);
        let line_number = index + 1;

        if in_header {
            if line.starts_with('#') {
                if line.starts_with("##contig=") {
                    if let Some(contig) = parse_contig_line(line)? {
                        // Check contig limit for DOS protection
                        if check_contig_limit(contigs.len()).is_some() {
                            return Err(ParseError::TooManyContigs(contigs.len()));
                        }
                        contigs.push(contig);
                    }
                }
                header_lines.push(line.to_string());
                continue;
            }
            in_header = false;
        }

        if line.is_empty() {
            continue;
        }
        records.push(parse_record_line(line, line_number)?);
    }

    if !header_lines
        .last()
        .is_some_and(|line| line.starts_with("#CHROM"))
    {
        return Err(ParseError::InvalidFormat(
            "VCF header does not end with a #CHROM column line".to_string(),
        ));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No ##contig lines found in VCF header".to_string(),
        ));
    }

    Ok(DecodedVcf {
        header: HeaderBlock::new(header_lines, contigs).with_crlf(crlf.unwrap_or(false)),
        records,
    })
}

/// Parse one tab-separated data line
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` if the line has fewer than five
/// columns, a non-numeric or zero POS, or an empty/invalid REF or ALT.
pub fn parse_record_line(line: &str, line_number: usize) -> Result<VariantRecord, ParseError> {
    let invalid = |message: String| ParseError::InvalidRecord {
        line: line_number,
        message,
    };

    let mut fields = line.split('\t');
    let mut next_column = |name: &str| {
        fields.next().ok_or_else(|| {
            invalid(format!(
                "expected at least {MIN_RECORD_COLUMNS} tab-separated columns, missing {name}"
            ))
        })
    };

    let chromosome = next_column("CHROM")?;
    let position = next_column("POS")?;
    let identifier = next_column("ID")?;
    let reference_allele = next_column("REF")?;
    let alternate_allele = next_column("ALT")?;

    if chromosome.is_empty() {
        return Err(invalid("empty CHROM".to_string()));
    }

    let position: u64 = position
        .parse()
        .map_err(|_| invalid(format!("invalid POS '{position}'")))?;
    if position == 0 {
        return Err(invalid("POS must be at least 1".to_string()));
    }

    if !is_valid_allele(reference_allele) {
        return Err(invalid(format!("invalid REF '{reference_allele}'")));
    }
    if !is_valid_allele(alternate_allele) {
        return Err(invalid(format!("invalid ALT '{alternate_allele}'")));
    }

    Ok(VariantRecord {
        chromosome: chromosome.to_string(),
        position,
        identifier: identifier.to_string(),
        reference_allele: reference_allele.to_string(),
        alternate_allele: alternate_allele.to_string(),
        remainder: fields.map(str::to_string).collect(),
        line_number,
    })
}

/// Parse a single ##contig=<...> line
fn parse_contig_line(line: &str) -> Result<Option<Contig>, ParseError> {
    // Format: ##contig=<ID=chr1,length=248956422,md5=abc123,...>
    let content = line
        .strip_prefix("##contig=<")
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Invalid contig line format: {line}"))
        })?;

    let mut name: Option<String> = None;
    let mut length: Option<u64> = None;

    // Parse key=value pairs, handling quoted values
    for part in split_contig_fields(content) {
        if let Some((key, value)) = part.split_once('=') {
            let key = key.trim();
            // Remove quotes from value if present
            let value = value.trim().trim_matches('"');

            match key.to_lowercase().as_str() {
                "id" => name = Some(value.to_string()),
                "length" => length = value.parse().ok(),
                _ => {}
            }
        }
    }

    // Skip malformed lines without ID
    Ok(name.map(|name| Contig { name, length }))
}

/// Split contig fields, handling commas inside quoted values.
///
/// This is UTF-8 safe because:
/// - Commas are single-byte ASCII (0x2C)
/// - `char_indices()` yields byte positions at character boundaries
/// - After a comma at position `i`, `i + 1` is always a valid boundary
fn split_contig_fields(content: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in content.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    fields.push(&content[start..]);
    fields
}
