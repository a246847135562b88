use serde::{Deserialize, Serialize};

use crate::core::record::VariantRecord;
use crate::core::types::Classification;

/// Audit trail entry for a record that was swapped or dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// ID column of the record
    pub identifier: String,

    /// 1-based line number of the record in the input
    pub line_number: usize,

    /// Chromosome as queried against the reference
    pub chromosome: String,

    /// 1-based position
    pub position: u64,

    pub classification: Classification,

    /// Reference bases at the position, absent when the lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_base: Option<String>,

    /// REF as stated in the input
    pub stated_reference: String,

    /// ALT as stated in the input
    pub stated_alternate: String,

    /// Lookup error message for `lookup_failed` entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DiagnosticEntry {
    pub fn new(
        record: &VariantRecord,
        classification: Classification,
        reference_base: Option<String>,
    ) -> Self {
        Self {
            identifier: record.identifier.clone(),
            line_number: record.line_number,
            chromosome: record.chromosome.clone(),
            position: record.position,
            classification,
            reference_base,
            stated_reference: record.reference_allele.clone(),
            stated_alternate: record.alternate_allele.clone(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for DiagnosticEntry {
    /// Multi-line block for operator review
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "[{}] {} (input line {}) at {}:{}",
            self.classification, self.identifier, self.line_number, self.chromosome, self.position
        )?;
        match &self.reference_base {
            Some(base) => writeln!(f, "  reference base: {base}")?,
            None => writeln!(f, "  reference base: unavailable")?,
        }
        write!(
            f,
            "  stated REF/ALT: {}/{}",
            self.stated_reference, self.stated_alternate
        )?;
        match (self.classification, &self.reference_base) {
            (Classification::Swapped, Some(base)) => write!(
                f,
                "\n  corrected REF/ALT: {}/{}",
                base.get(..self.stated_alternate.len()).unwrap_or(base),
                self.stated_reference
            ),
            (Classification::Irreconcilable | Classification::LookupFailed, _) => {
                write!(f, "\n  action: dropped")?;
                if let Some(detail) = &self.detail {
                    write!(f, " ({detail})")?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
