use std::path::Path;

use tracing::info;

use crate::core::contig::Contig;
use crate::core::header::HeaderBlock;
use crate::core::record::VariantRecord;
use crate::parsing::vcf::{read_vcf_file, DecodedVcf};
use crate::parsing::ParseError;
use crate::transform::{NormalizationConfig, Normalizations};

/// A decoded VCF with its normalizations applied, ready for reference lookups.
///
/// The store remembers which normalizations it applied so the assembler can
/// undo them on output.
#[derive(Debug, Clone)]
pub struct VariantStore {
    pub header: HeaderBlock,
    pub records: Vec<VariantRecord>,
    pub normalizations: Normalizations,
}

impl VariantStore {
    /// Decode a VCF file and normalize it against the reference's contigs
    ///
    /// # Errors
    ///
    /// Returns any `ParseError` raised while decoding the VCF.
    pub fn open(
        path: &Path,
        reference_contigs: &[Contig],
        config: &NormalizationConfig,
    ) -> Result<Self, ParseError> {
        let decoded = read_vcf_file(path)?;
        info!(
            "Decoded {} header lines and {} records from {}",
            decoded.header.lines.len(),
            decoded.records.len(),
            path.display()
        );
        Ok(Self::from_decoded(decoded, reference_contigs, config))
    }

    /// Normalize an already decoded VCF
    #[must_use]
    pub fn from_decoded(
        decoded: DecodedVcf,
        reference_contigs: &[Contig],
        config: &NormalizationConfig,
    ) -> Self {
        let DecodedVcf {
            mut header,
            mut records,
        } = decoded;

        let normalizations =
            Normalizations::detect(config, &header, &records, reference_contigs);
        for normalization in normalizations.active() {
            info!("Applying {} normalization", normalization.name());
        }

        normalizations.apply_header(&mut header);
        for record in &mut records {
            normalizations.apply_record(record);
        }

        Self {
            header,
            records,
            normalizations,
        }
    }
}
