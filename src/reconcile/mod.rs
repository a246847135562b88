//! Allele reconciliation against the reference.
//!
//! - [`ReconciliationEngine`]: classifies and rewrites every record
//! - [`DiagnosticEntry`]: audit trail entry for each swapped or dropped record
//! - [`report`]: text, JSON and TSV rendering of the diagnostic trail
//!
//! ## Algorithm
//!
//! For each record, the engine fetches the reference bases at the record's
//! position and compares them with the stated alleles:
//!
//! 1. **Agree**: REF equals the reference; the record is kept unchanged
//! 2. **Swapped**: REF differs but ALT equals the reference; the record was
//!    written major/minor, so REF and ALT are exchanged
//! 3. **Irreconcilable**: neither allele equals the reference; the record is
//!    dropped
//! 4. **Lookup failed**: the reference has no bases at that coordinate; the
//!    record is dropped
//!
//! Only the first case is silent; every other record gets a diagnostic.
//!
//! ## Example
//!
//! ```rust
//! use ref_reconcile::reconcile::{ReconcileConfig, ReconciliationEngine};
//! use ref_reconcile::reference::InMemoryReference;
//! use ref_reconcile::VariantRecord;
//!
//! let reference = InMemoryReference::from_sequences([("1", "ACGT")]);
//! let records = vec![VariantRecord::new("1", 3, "rs1", "A", "G")];
//!
//! let engine = ReconciliationEngine::new(ReconcileConfig::default());
//! let result = engine.reconcile(records, &reference);
//!
//! assert_eq!(result.records[0].reference_allele, "G");
//! assert_eq!(result.records[0].alternate_allele, "A");
//! assert_eq!(result.summary.swapped, 1);
//! ```

pub mod diagnosis;
pub mod engine;
pub mod report;

pub use diagnosis::DiagnosticEntry;
pub use engine::{
    classify, ReconcileConfig, ReconcileSummary, Reconciliation, ReconciliationEngine,
};
pub use report::{write_report, ReportFormat};
