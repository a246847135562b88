use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::record::VariantRecord;
use crate::core::types::Classification;
use crate::reconcile::diagnosis::DiagnosticEntry;
use crate::reference::ReferenceLookup;
use crate::transform::NormalizationConfig;

/// Configuration for a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Worker threads for per-record work; 1 runs on the calling thread
    pub threads: usize,

    /// Text constants for the header and record normalizations
    pub normalization: NormalizationConfig,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            normalization: NormalizationConfig::default(),
        }
    }
}

/// Per-classification record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub total: usize,
    pub agreed: usize,
    pub swapped: usize,
    pub irreconcilable: usize,
    pub lookup_failed: usize,
    /// Records written to the output
    pub emitted: usize,
}

impl ReconcileSummary {
    /// Records dropped for either reason
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.irreconcilable + self.lookup_failed
    }

    fn count(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::Agree => self.agreed += 1,
            Classification::Swapped => self.swapped += 1,
            Classification::Irreconcilable => self.irreconcilable += 1,
            Classification::LookupFailed => self.lookup_failed += 1,
        }
        if classification.is_retained() {
            self.emitted += 1;
        }
    }
}

/// Output of a reconciliation run
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Surviving records in input order
    pub records: Vec<VariantRecord>,

    /// One entry per swapped or dropped record, in input order
    pub diagnostics: Vec<DiagnosticEntry>,

    pub summary: ReconcileSummary,
}

/// Classify stated alleles against the reference bases at their position.
///
/// `reference_bases` starts at the record position and must cover the longer
/// of the two alleles; each allele is compared for exact equality with the
/// reference prefix of its own length.
///
/// This differs from comparing against the single base at the position only
/// for multi-base alleles: a deletion `AT>A` over reference `AT` agrees here,
/// where a single-base comparison would call it swapped. Single-base alleles
/// classify identically either way.
#[must_use]
pub fn classify(
    stated_reference: &str,
    stated_alternate: &str,
    reference_bases: &str,
) -> Classification {
    let matches_reference = |allele: &str| reference_bases.get(..allele.len()) == Some(allele);

    if matches_reference(stated_reference) {
        Classification::Agree
    } else if matches_reference(stated_alternate) {
        Classification::Swapped
    } else {
        Classification::Irreconcilable
    }
}

struct RecordOutcome {
    classification: Classification,
    record: Option<VariantRecord>,
    diagnostic: Option<DiagnosticEntry>,
}

/// Reconciles records against a reference, one record at a time
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: ReconcileConfig,
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Reconcile every record, returning survivors and the diagnostic trail.
    ///
    /// Per-record failures never abort the run. Results are identical for any
    /// thread count.
    pub fn reconcile(
        &self,
        records: Vec<VariantRecord>,
        lookup: &dyn ReferenceLookup,
    ) -> Reconciliation {
        let outcomes = if self.config.threads > 1 {
            self.reconcile_parallel(records, lookup)
        } else {
            records
                .into_iter()
                .map(|record| reconcile_record(record, lookup))
                .collect()
        };

        let mut result = Reconciliation::default();
        for outcome in outcomes {
            result.summary.count(outcome.classification);
            if let Some(diagnostic) = outcome.diagnostic {
                log_diagnostic(&diagnostic);
                result.diagnostics.push(diagnostic);
            }
            if let Some(record) = outcome.record {
                result.records.push(record);
            }
        }

        let summary = &result.summary;
        info!(
            total = summary.total,
            agreed = summary.agreed,
            swapped = summary.swapped,
            irreconcilable = summary.irreconcilable,
            lookup_failed = summary.lookup_failed,
            "Reconciliation complete"
        );

        result
    }

    fn reconcile_parallel(
        &self,
        records: Vec<VariantRecord>,
        lookup: &dyn ReferenceLookup,
    ) -> Vec<RecordOutcome> {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
        {
            Ok(pool) => {
                debug!(threads = self.config.threads, "Reconciling in parallel");
                // Indexed collect keeps input order regardless of completion order
                pool.install(|| {
                    records
                        .into_par_iter()
                        .map(|record| reconcile_record(record, lookup))
                        .collect()
                })
            }
            Err(e) => {
                warn!("Failed to start thread pool ({e}), reconciling sequentially");
                records
                    .into_iter()
                    .map(|record| reconcile_record(record, lookup))
                    .collect()
            }
        }
    }
}

fn reconcile_record(record: VariantRecord, lookup: &dyn ReferenceLookup) -> RecordOutcome {
    let span = record.allele_span();
    let reference_bases = match lookup.fetch(&record.chromosome, record.position, span) {
        Ok(bases) => bases,
        Err(e) => {
            let diagnostic = DiagnosticEntry::new(&record, Classification::LookupFailed, None)
                .with_detail(e.to_string());
            return RecordOutcome {
                classification: Classification::LookupFailed,
                record: None,
                diagnostic: Some(diagnostic),
            };
        }
    };

    let classification = classify(
        &record.reference_allele,
        &record.alternate_allele,
        &reference_bases,
    );

    match classification {
        Classification::Agree => RecordOutcome {
            classification,
            record: Some(record),
            diagnostic: None,
        },
        Classification::Swapped => {
            // ALT matched, so this prefix is exactly the ALT-length reference
            let true_reference = reference_bases
                .get(..record.alternate_allele.len())
                .unwrap_or(&reference_bases);
            let diagnostic = DiagnosticEntry::new(
                &record,
                classification,
                Some(true_reference.to_string()),
            );
            RecordOutcome {
                classification,
                record: Some(record.swapped(true_reference)),
                diagnostic: Some(diagnostic),
            }
        }
        Classification::Irreconcilable | Classification::LookupFailed => RecordOutcome {
            classification,
            record: None,
            diagnostic: Some(DiagnosticEntry::new(
                &record,
                classification,
                Some(reference_bases),
            )),
        },
    }
}

fn log_diagnostic(diagnostic: &DiagnosticEntry) {
    let reference = diagnostic.reference_base.as_deref().unwrap_or("?");
    match diagnostic.classification {
        Classification::Swapped => info!(
            id = %diagnostic.identifier,
            line = diagnostic.line_number,
            "Swapped REF/ALT at {}:{}: stated {}/{}, reference {}",
            diagnostic.chromosome,
            diagnostic.position,
            diagnostic.stated_reference,
            diagnostic.stated_alternate,
            reference
        ),
        Classification::Irreconcilable => warn!(
            id = %diagnostic.identifier,
            line = diagnostic.line_number,
            "Dropped irreconcilable record at {}:{}: stated {}/{}, reference {}",
            diagnostic.chromosome,
            diagnostic.position,
            diagnostic.stated_reference,
            diagnostic.stated_alternate,
            reference
        ),
        Classification::LookupFailed => warn!(
            id = %diagnostic.identifier,
            line = diagnostic.line_number,
            "Dropped record at {}:{}, reference lookup failed: {}",
            diagnostic.chromosome,
            diagnostic.position,
            diagnostic.detail.as_deref().unwrap_or("unknown error")
        ),
        Classification::Agree => {}
    }
}
