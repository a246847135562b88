use serde::{Deserialize, Serialize};

use crate::core::contig::Contig;

/// Prefix of VCF contig declaration lines
pub const CONTIG_LINE_PREFIX: &str = "##contig=<ID=";

/// The header block of a VCF file: all `##` meta lines followed by the
/// `#CHROM` column line, kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderBlock {
    /// Header lines in file order, without line terminators
    pub lines: Vec<String>,

    /// Contigs declared by `##contig` lines
    pub contigs: Vec<Contig>,

    /// The input used `\r\n` line terminators
    #[serde(default)]
    pub crlf: bool,
}

impl HeaderBlock {
    #[must_use]
    pub fn new(lines: Vec<String>, contigs: Vec<Contig>) -> Self {
        Self {
            lines,
            contigs,
            crlf: false,
        }
    }

    #[must_use]
    pub fn with_crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    /// True when any declared contig name starts with `prefix`
    #[must_use]
    pub fn declares_prefix(&self, prefix: &str) -> bool {
        self.contigs.iter().any(|c| c.name.starts_with(prefix))
    }

    /// Line terminator to write back
    #[must_use]
    pub fn line_ending(&self) -> &'static str {
        if self.crlf {
            "\r\n"
        } else {
            "\n"
        }
    }
}
