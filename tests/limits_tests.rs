//! Resource limit tests.
//!
//! Inputs declaring absurd numbers of contigs are rejected during decoding
//! instead of being carried through the run.

use std::fmt::Write;

use ref_reconcile::parsing::vcf::read_vcf;
use ref_reconcile::parsing::ParseError;
use ref_reconcile::utils::validation::MAX_CONTIGS;

fn header_with_contigs(count: usize) -> String {
    let mut text = String::from("##fileformat=VCFv4.2\n");
    for i in 0..count {
        writeln!(text, "##contig=<ID=ctg{i},length=100>").unwrap();
    }
    text.push_str("#CHROM\tPOS\tID\tREF\tALT\n");
    text
}

#[test]
fn test_contig_limit_enforced() {
    let text = header_with_contigs(MAX_CONTIGS + 1);
    let result = read_vcf(text.as_bytes());
    assert!(matches!(result, Err(ParseError::TooManyContigs(n)) if n == MAX_CONTIGS));
}

#[test]
fn test_contig_limit_allows_maximum() {
    let text = header_with_contigs(MAX_CONTIGS);
    let decoded = read_vcf(text.as_bytes()).unwrap();
    assert_eq!(decoded.header.contigs.len(), MAX_CONTIGS);
    assert!(decoded.records.is_empty());
}
