//! # ref-reconcile
//!
//! A library for reconciling VCF REF/ALT alleles against a reference genome.
//!
//! Some tools write variants in major/minor order: the first allele is the one
//! most frequent in a sample population, not the one carried by the reference
//! genome. Downstream tools that assume REF is the reference base then silently
//! misinterpret the data.
//!
//! `ref-reconcile` looks up each record's position in a FASTA reference and
//! rewrites the record so that REF is the reference base.
//!
//! ## Features
//!
//! - **Swap detection**: Records whose ALT is the reference base get REF and ALT exchanged
//! - **Drop with audit trail**: Records matching neither allele, or outside the
//!   reference, are dropped with a diagnostic entry
//! - **Contig naming**: NCBI-style VCFs (`1`) can be reconciled against
//!   UCSC-style references (`chr1`) without altering the output names
//! - **Byte-faithful output**: Everything other than REF/ALT and one header
//!   sentence is written back as read
//! - **Indexed output**: bgzip-compressed VCF plus tabix index
//!
//! ## Example
//!
//! ```rust
//! use ref_reconcile::reconcile::{ReconcileConfig, ReconciliationEngine};
//! use ref_reconcile::reference::InMemoryReference;
//! use ref_reconcile::{Classification, VariantRecord};
//!
//! let reference = InMemoryReference::from_sequences([("1", "GATTACA")]);
//! let records = vec![
//!     VariantRecord::new("1", 1, "rs1", "G", "A"),
//!     VariantRecord::new("1", 2, "rs2", "C", "A"),
//!     VariantRecord::new("1", 3, "rs3", "C", "G"),
//! ];
//!
//! let engine = ReconciliationEngine::new(ReconcileConfig::default());
//! let result = engine.reconcile(records, &reference);
//!
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.diagnostics[0].classification, Classification::Swapped);
//! assert_eq!(result.diagnostics[1].classification, Classification::Irreconcilable);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for contigs, headers, and records
//! - [`parsing`]: Decoders for VCF, FASTA and FASTA index files
//! - [`reference`]: Reference base lookups
//! - [`transform`]: Invertible header and record normalizations
//! - [`reconcile`]: Reconciliation engine and diagnostics
//! - [`output`]: Assembly, bgzip compression and tabix indexing
//! - [`pipeline`]: End-to-end run
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod reconcile;
pub mod reference;
pub mod transform;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::contig::Contig;
pub use core::header::HeaderBlock;
pub use core::record::VariantRecord;
pub use core::store::VariantStore;
pub use core::types::*;
pub use pipeline::{run, RunConfig, RunError, RunOutcome};
pub use reconcile::{DiagnosticEntry, Reconciliation, ReconciliationEngine};
pub use reference::ReferenceLookup;
