//! Core data types for allele reconciliation.
//!
//! - [`Contig`]: A reference sequence unit declared in a VCF header or FASTA index
//! - [`VariantRecord`]: One decoded VCF data line
//! - [`HeaderBlock`]: The VCF meta lines plus the `#CHROM` column line
//! - [`VariantStore`]: Header and records, normalized for reference lookups
//! - [`Classification`]: Outcome of comparing stated alleles with the reference
//!
//! ## Contig Naming
//!
//! Different reference sources use different naming conventions:
//!
//! | Source | Chromosome 1 | Mitochondrial |
//! |--------|--------------|---------------|
//! | UCSC   | chr1         | chrM          |
//! | NCBI   | 1            | MT            |
//! | Ensembl| 1            | MT            |
//!
//! Reference lookups use **exact names**. When a VCF declares NCBI-style
//! contigs against a UCSC-style reference, the store synthesizes the `chr`
//! prefix (see [`crate::transform::ChromPrefix`]) and the assembler removes it
//! again on output.

pub mod contig;
pub mod header;
pub mod record;
pub mod store;
pub mod types;
