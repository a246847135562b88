use serde::{Deserialize, Serialize};

/// Outcome of comparing a record's stated alleles with the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Stated REF equals the reference base; the record is kept as-is
    Agree,
    /// Stated ALT equals the reference base; REF and ALT are exchanged
    Swapped,
    /// Neither stated allele equals the reference base; the record is dropped
    Irreconcilable,
    /// The reference base could not be fetched; the record is dropped
    LookupFailed,
}

impl Classification {
    /// Whether a record with this classification survives into the output
    #[must_use]
    pub fn is_retained(self) -> bool {
        matches!(self, Self::Agree | Self::Swapped)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agree => "agree",
            Self::Swapped => "swapped",
            Self::Irreconcilable => "irreconcilable",
            Self::LookupFailed => "lookup_failed",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
