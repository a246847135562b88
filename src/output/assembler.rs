use std::io::{self, Write};

use crate::core::header::HeaderBlock;
use crate::core::record::VariantRecord;
use crate::transform::Normalizations;

/// Turns a normalized header and reconciled records back into VCF text.
///
/// Invertible normalizations are undone first (header, then records), and only
/// then is the one-way sentence replacement applied to the header.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'a> {
    normalizations: &'a Normalizations,
}

impl<'a> Assembler<'a> {
    #[must_use]
    pub fn new(normalizations: &'a Normalizations) -> Self {
        Self { normalizations }
    }

    /// Header lines as they should appear in the output
    #[must_use]
    pub fn header_lines(&self, header: &HeaderBlock) -> Vec<String> {
        let mut header = header.clone();
        self.normalizations.invert_header(&mut header);
        header
            .lines
            .iter()
            .map(|line| self.normalizations.sentence.rewrite(line).into_owned())
            .collect()
    }

    /// A record with the store's normalizations undone
    #[must_use]
    pub fn record(&self, record: &VariantRecord) -> VariantRecord {
        let mut record = record.clone();
        self.normalizations.invert_record(&mut record);
        record
    }

    /// Write the complete VCF text, one line per header line and record, with
    /// the input's line terminator
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write<W: Write>(
        &self,
        writer: &mut W,
        header: &HeaderBlock,
        records: &[VariantRecord],
    ) -> io::Result<()> {
        let ending = header.line_ending();
        for line in self.header_lines(header) {
            write!(writer, "{line}{ending}")?;
        }
        for record in records {
            write!(writer, "{}{ending}", self.record(record).to_line())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::Contig;
    use crate::core::store::VariantStore;
    use crate::parsing::vcf::read_vcf;
    use crate::transform::NormalizationConfig;

    const VCF: &str = "##fileformat=VCFv4.2
##contig=<ID=1,length=1000>
##contig=<ID=2,length=500>
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency; nan when unknown\">
##Tassel=<ID=GenotypeTable,Version=5,Description=\"Reference allele is not known. The major allele was used as reference allele\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\trs1\tA\tG\t.\tPASS\tAF=nan
2\t7\tnan\tC\tT\t.\tPASS\tAF=0.1
";

    fn assemble(reference: &[Contig]) -> String {
        assemble_text(VCF, reference)
    }

    fn assemble_text(vcf: &str, reference: &[Contig]) -> String {
        let decoded = read_vcf(vcf.as_bytes()).unwrap();
        let store =
            VariantStore::from_decoded(decoded, reference, &NormalizationConfig::default());
        let mut out = Vec::new();
        Assembler::new(&store.normalizations)
            .write(&mut out, &store.header, &store.records)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_round_trip_except_sentence() {
        let reference = [Contig::new("chr1"), Contig::new("chr2")];
        let expected = VCF.replace(
            "Reference allele is not known. The major allele was used as reference allele",
            "Reference allele is the base found in the supplied reference genome",
        );
        assert_eq!(assemble(&reference), expected);
    }

    #[test]
    fn test_round_trip_without_prefix() {
        let reference = [Contig::new("1"), Contig::new("2")];
        let output = assemble(&reference);
        assert!(output.contains("##contig=<ID=1,length=1000>"));
        assert!(output.contains("1\t100\trs1\tA\tG\t.\tPASS\tAF=nan\n"));
        assert!(!output.contains("The major allele was used"));
    }

    #[test]
    fn test_crlf_terminators_preserved() {
        let crlf = VCF.replace('\n', "\r\n");
        let reference = [Contig::new("chr1"), Contig::new("chr2")];
        let expected = crlf.replace(
            "Reference allele is not known. The major allele was used as reference allele",
            "Reference allele is the base found in the supplied reference genome",
        );
        assert_eq!(assemble_text(&crlf, &reference), expected);
    }

    #[test]
    fn test_record_inverted() {
        let decoded = read_vcf(VCF.as_bytes()).unwrap();
        let reference = [Contig::new("chr1")];
        let store =
            VariantStore::from_decoded(decoded, &reference, &NormalizationConfig::default());
        assert_eq!(store.records[1].identifier, "NaN");

        let assembler = Assembler::new(&store.normalizations);
        let record = assembler.record(&store.records[1]);
        assert_eq!(record.chromosome, "2");
        assert_eq!(record.identifier, "nan");
    }
}
