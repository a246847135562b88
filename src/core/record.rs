use serde::{Deserialize, Serialize};

/// A single decoded VCF data line.
///
/// Only the columns the reconciliation needs are broken out. Everything after
/// ALT (QUAL, FILTER, INFO, FORMAT and sample columns) is carried verbatim in
/// `remainder` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// CHROM column
    pub chromosome: String,

    /// POS column, 1-based
    pub position: u64,

    /// ID column
    pub identifier: String,

    /// REF column
    pub reference_allele: String,

    /// ALT column
    pub alternate_allele: String,

    /// Columns 6 and beyond, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remainder: Vec<String>,

    /// 1-based line number of the record in the decompressed input
    pub line_number: usize,
}

impl VariantRecord {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        identifier: impl Into<String>,
        reference_allele: impl Into<String>,
        alternate_allele: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            identifier: identifier.into(),
            reference_allele: reference_allele.into(),
            alternate_allele: alternate_allele.into(),
            remainder: Vec::new(),
            line_number: 0,
        }
    }

    #[must_use]
    pub fn with_remainder<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remainder = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// Length of the reference interval needed to check both stated alleles
    #[must_use]
    pub fn allele_span(&self) -> usize {
        self.reference_allele
            .len()
            .max(self.alternate_allele.len())
            .max(1)
    }

    /// Copy of this record with REF and ALT relabelled against `reference_bases`.
    /// The previous REF becomes the new ALT.
    #[must_use]
    pub fn swapped(&self, reference_bases: &str) -> Self {
        Self {
            reference_allele: reference_bases.to_string(),
            alternate_allele: self.reference_allele.clone(),
            ..self.clone()
        }
    }

    /// Render the record as a tab-separated VCF data line (no newline)
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}",
            self.chromosome,
            self.position,
            self.identifier,
            self.reference_allele,
            self.alternate_allele
        );
        for field in &self.remainder {
            line.push('\t');
            line.push_str(field);
        }
        line
    }
}
