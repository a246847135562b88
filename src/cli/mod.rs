//! Command-line interface for ref-reconcile.
//!
//! ## Usage
//!
//! ```text
//! # Reconcile against an uncompressed (indexed) FASTA
//! ref-reconcile --vcf calls.vcf --reference GRCh38.fa --output calls.ref.vcf.gz
//!
//! # Write the diagnostic trail as TSV and use four threads
//! ref-reconcile --vcf calls.vcf.gz --reference GRCh38.fa.gz \
//!     --output calls.ref.vcf.gz --report swaps.tsv --format tsv --threads 4
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::reconcile::ReportFormat;

pub mod reconcile;

#[derive(Parser)]
#[command(name = "ref-reconcile")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Reconcile VCF REF/ALT alleles against a reference genome")]
#[command(
    long_about = "ref-reconcile rewrites a VCF whose alleles were written as major/minor so that REF is the base found in the supplied reference genome.\n\nFor every record:\n- REF matches the reference: kept unchanged\n- ALT matches the reference: REF and ALT are swapped\n- Neither matches, or the position is not in the reference: dropped\n\nThe output is bgzip-compressed and tabix-indexed."
)]
pub struct Cli {
    /// Input VCF (plain, gzip or bgzip)
    #[arg(long, value_parser = existing_file)]
    pub vcf: PathBuf,

    /// Reference FASTA (.fa, .fasta or .fna, optionally gzip-compressed)
    #[arg(long, value_parser = existing_file)]
    pub reference: PathBuf,

    /// Output path for the bgzip-compressed VCF; the index is written to <OUTPUT>.tbi
    #[arg(long)]
    pub output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for the run summary and the report
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Also write every diagnostic entry to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Worker threads for reconciliation
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,

    /// Overwrite the output and index if they exist
    #[arg(long)]
    pub force: bool,

    /// Directory for scratch files (defaults to the output's directory)
    #[arg(long)]
    pub tmp_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Tsv => Self::Tsv,
        }
    }
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file does not exist: {value}"))
    }
}
