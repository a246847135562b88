//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

/// NCBI-named VCF written in major/minor order.
///
/// Against [`reference_sequences`]: rs1 is swapped, rs2 and rs4 agree, rs3 is
/// irreconcilable and rs5 lies past the end of chr2.
pub const MAJOR_MINOR_VCF: &str = "##fileformat=VCFv4.2
##Tassel=<ID=GenotypeTable,Version=5,Description=\"Reference allele is not known. The major allele was used as reference allele\">
##contig=<ID=1,length=300>
##contig=<ID=2,length=50>
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\trs1\tA\tG\t.\tPASS\tAF=nan
1\t200\trs2\tA\tG\t.\tPASS\tAF=0.5
1\t300\trs3\tA\tG\t.\tPASS\tAF=0.1
2\t10\trs4\tT\tC\t.\tPASS\tAF=0.2
2\t60\trs5\tT\tC\t.\tPASS\tAF=0.3
";

/// Expected decompressed output for [`MAJOR_MINOR_VCF`]
pub const RECONCILED_VCF: &str = "##fileformat=VCFv4.2
##Tassel=<ID=GenotypeTable,Version=5,Description=\"Reference allele is the base found in the supplied reference genome\">
##contig=<ID=1,length=300>
##contig=<ID=2,length=50>
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\trs1\tG\tA\t.\tPASS\tAF=nan
1\t200\trs2\tA\tG\t.\tPASS\tAF=0.5
2\t10\trs4\tT\tC\t.\tPASS\tAF=0.2
";

/// UCSC-named reference: chr1 is all T except G at 100, A at 200 and C at
/// 300; chr2 is 50 T's
pub fn reference_sequences() -> Vec<(&'static str, String)> {
    let mut chr1 = vec![b'T'; 300];
    chr1[99] = b'G';
    chr1[199] = b'A';
    chr1[299] = b'C';
    vec![
        ("chr1", String::from_utf8(chr1).unwrap()),
        ("chr2", "T".repeat(50)),
    ]
}

fn fasta_text() -> String {
    let mut text = String::new();
    for (name, sequence) in reference_sequences() {
        text.push_str(&format!(">{name}\n"));
        for line in sequence.as_bytes().chunks(60) {
            text.push_str(std::str::from_utf8(line).unwrap());
            text.push('\n');
        }
    }
    text
}

pub fn write_fasta(dir: &Path) -> PathBuf {
    let path = dir.join("ref.fa");
    fs::write(&path, fasta_text()).unwrap();
    path
}

pub fn write_gzip_fasta(dir: &Path) -> PathBuf {
    let path = dir.join("ref.fa.gz");
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(fasta_text().as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

pub fn write_vcf(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Decompress a bgzip output file to text
pub fn read_output(path: &Path) -> String {
    let mut text = String::new();
    ref_reconcile::parsing::open_text_reader(path)
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    text
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
