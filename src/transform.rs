//! Named text normalizations applied when decoding and undone when assembling.
//!
//! Two normalizations are invertible and applied symmetrically:
//!
//! - [`ChromPrefix`]: synthesizes the `chr` prefix on contig declarations and
//!   record chromosomes so that NCBI-style VCFs can be looked up in a
//!   UCSC-style reference
//! - [`PlaceholderToken`]: rewrites the raw missing-metadata token (`nan`) to
//!   its canonical spelling (`NaN`)
//!
//! Each is only activated when applying it and undoing it reproduces the input
//! byte for byte. The third rewrite, [`SentenceReplacement`], is one-way and
//! only runs on output.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::core::contig::Contig;
use crate::core::header::{HeaderBlock, CONTIG_LINE_PREFIX};
use crate::core::record::VariantRecord;

pub const DEFAULT_CHR_PREFIX: &str = "chr";
pub const DEFAULT_RAW_PLACEHOLDER: &str = "nan";
pub const DEFAULT_CANONICAL_PLACEHOLDER: &str = "NaN";
/// Written by TASSEL into its `##Tassel=<ID=GenotypeTable,...>` header line
pub const MAJOR_ALLELE_SENTENCE: &str =
    "Reference allele is not known. The major allele was used as reference allele";
pub const REFERENCE_ALLELE_SENTENCE: &str =
    "Reference allele is the base found in the supplied reference genome";

/// Text constants used by the normalizations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Prefix synthesized for unprefixed contig names
    pub chr_prefix: String,
    /// Placeholder token as written by the producing tool
    pub raw_placeholder: String,
    /// Canonical spelling of the placeholder token
    pub canonical_placeholder: String,
    /// Header sentence stating that the major allele was used as REF
    pub source_sentence: String,
    /// Sentence written in its place
    pub replacement_sentence: String,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            chr_prefix: DEFAULT_CHR_PREFIX.to_string(),
            raw_placeholder: DEFAULT_RAW_PLACEHOLDER.to_string(),
            canonical_placeholder: DEFAULT_CANONICAL_PLACEHOLDER.to_string(),
            source_sentence: MAJOR_ALLELE_SENTENCE.to_string(),
            replacement_sentence: REFERENCE_ALLELE_SENTENCE.to_string(),
        }
    }
}

/// An exactly invertible rewrite of header lines and records
pub trait Normalization: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn apply_header(&self, header: &mut HeaderBlock);
    fn invert_header(&self, header: &mut HeaderBlock);
    fn apply_record(&self, record: &mut VariantRecord);
    fn invert_record(&self, record: &mut VariantRecord);
}

/// Prepends a prefix to every declared contig ID and record chromosome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromPrefix {
    prefix: String,
}

impl ChromPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Active when the header declares contigs, none of them carry the prefix,
    /// and the reference names at least one contig with it.
    #[must_use]
    pub fn detect(
        prefix: &str,
        header: &HeaderBlock,
        reference_contigs: &[Contig],
    ) -> Option<Self> {
        if prefix.is_empty() || header.contigs.is_empty() || header.declares_prefix(prefix) {
            return None;
        }
        reference_contigs
            .iter()
            .any(|c| c.name.starts_with(prefix))
            .then(|| Self::new(prefix))
    }

    fn add(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    fn strip<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.prefix.as_str()).unwrap_or(name)
    }
}

impl Normalization for ChromPrefix {
    fn name(&self) -> &'static str {
        "chromosome prefix"
    }

    fn apply_header(&self, header: &mut HeaderBlock) {
        for line in &mut header.lines {
            if let Some(rest) = line.strip_prefix(CONTIG_LINE_PREFIX) {
                *line = format!("{CONTIG_LINE_PREFIX}{}", self.add(rest));
            }
        }
        for contig in &mut header.contigs {
            contig.name = self.add(&contig.name);
        }
    }

    fn invert_header(&self, header: &mut HeaderBlock) {
        for line in &mut header.lines {
            if let Some(rest) = line.strip_prefix(CONTIG_LINE_PREFIX) {
                *line = format!("{CONTIG_LINE_PREFIX}{}", self.strip(rest));
            }
        }
        for contig in &mut header.contigs {
            contig.name = self.strip(&contig.name).to_string();
        }
    }

    fn apply_record(&self, record: &mut VariantRecord) {
        record.chromosome = self.add(&record.chromosome);
    }

    fn invert_record(&self, record: &mut VariantRecord) {
        record.chromosome = self.strip(&record.chromosome).to_string();
    }
}

/// Rewrites whole occurrences of one placeholder token into another spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    raw: String,
    canonical: String,
}

impl PlaceholderToken {
    pub fn new(raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            canonical: canonical.into(),
        }
    }

    /// Active when the raw token occurs somewhere and the canonical spelling
    /// occurs nowhere, so that undoing the rewrite cannot touch original text.
    #[must_use]
    pub fn detect(
        raw: &str,
        canonical: &str,
        header: &HeaderBlock,
        records: &[VariantRecord],
    ) -> Option<Self> {
        if raw.is_empty() || canonical.is_empty() || raw == canonical {
            return None;
        }

        let texts = || {
            header
                .lines
                .iter()
                .map(String::as_str)
                .chain(records.iter().flat_map(|r| {
                    std::iter::once(r.identifier.as_str())
                        .chain(r.remainder.iter().map(String::as_str))
                }))
        };

        if texts().any(|t| contains_token(t, canonical)) {
            return None;
        }
        texts()
            .any(|t| contains_token(t, raw))
            .then(|| Self::new(raw, canonical))
    }

    fn rewrite_record(record: &mut VariantRecord, from: &str, to: &str) {
        replace_tokens_in_place(&mut record.identifier, from, to);
        for field in &mut record.remainder {
            replace_tokens_in_place(field, from, to);
        }
    }

    fn rewrite_header(header: &mut HeaderBlock, from: &str, to: &str) {
        for line in &mut header.lines {
            replace_tokens_in_place(line, from, to);
        }
    }
}

impl Normalization for PlaceholderToken {
    fn name(&self) -> &'static str {
        "placeholder token"
    }

    fn apply_header(&self, header: &mut HeaderBlock) {
        Self::rewrite_header(header, &self.raw, &self.canonical);
    }

    fn invert_header(&self, header: &mut HeaderBlock) {
        Self::rewrite_header(header, &self.canonical, &self.raw);
    }

    fn apply_record(&self, record: &mut VariantRecord) {
        Self::rewrite_record(record, &self.raw, &self.canonical);
    }

    fn invert_record(&self, record: &mut VariantRecord) {
        Self::rewrite_record(record, &self.canonical, &self.raw);
    }
}

/// One-way substitution of a fixed header sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceReplacement {
    from: String,
    to: String,
}

impl SentenceReplacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if !self.from.is_empty() && line.contains(self.from.as_str()) {
            Cow::Owned(line.replace(self.from.as_str(), &self.to))
        } else {
            Cow::Borrowed(line)
        }
    }
}

/// The normalizations in effect for one input file
#[derive(Debug, Clone)]
pub struct Normalizations {
    pub chrom_prefix: Option<ChromPrefix>,
    pub placeholder: Option<PlaceholderToken>,
    pub sentence: SentenceReplacement,
}

impl Normalizations {
    /// No invertible normalization active; only the sentence replacement
    #[must_use]
    pub fn inactive(config: &NormalizationConfig) -> Self {
        Self {
            chrom_prefix: None,
            placeholder: None,
            sentence: SentenceReplacement::new(
                config.source_sentence.clone(),
                config.replacement_sentence.clone(),
            ),
        }
    }

    /// Decide which normalizations the decoded input needs
    #[must_use]
    pub fn detect(
        config: &NormalizationConfig,
        header: &HeaderBlock,
        records: &[VariantRecord],
        reference_contigs: &[Contig],
    ) -> Self {
        Self {
            chrom_prefix: ChromPrefix::detect(&config.chr_prefix, header, reference_contigs),
            placeholder: PlaceholderToken::detect(
                &config.raw_placeholder,
                &config.canonical_placeholder,
                header,
                records,
            ),
            ..Self::inactive(config)
        }
    }

    /// Active invertible normalizations, in application order
    pub fn active(&self) -> Vec<&dyn Normalization> {
        let mut active: Vec<&dyn Normalization> = Vec::new();
        if let Some(prefix) = &self.chrom_prefix {
            active.push(prefix);
        }
        if let Some(token) = &self.placeholder {
            active.push(token);
        }
        active
    }

    pub fn apply_header(&self, header: &mut HeaderBlock) {
        for n in self.active() {
            n.apply_header(header);
        }
    }

    pub fn invert_header(&self, header: &mut HeaderBlock) {
        for n in self.active().into_iter().rev() {
            n.invert_header(header);
        }
    }

    pub fn apply_record(&self, record: &mut VariantRecord) {
        for n in self.active() {
            n.apply_record(record);
        }
    }

    pub fn invert_record(&self, record: &mut VariantRecord) {
        for n in self.active().into_iter().rev() {
            n.invert_record(record);
        }
    }
}

fn is_token_delimiter(c: char) -> bool {
    matches!(
        c,
        '\t' | ' ' | ';' | '=' | ',' | ':' | '<' | '>' | '"' | '|' | '/'
    )
}

/// Check if `token` occurs in `text` as a whole delimiter-separated token
pub fn contains_token(text: &str, token: &str) -> bool {
    text.contains(token) && text.split(is_token_delimiter).any(|t| t == token)
}

/// Replace whole-token occurrences of `from` with `to`, leaving delimiters intact
pub fn replace_tokens<'a>(text: &'a str, from: &str, to: &str) -> Cow<'a, str> {
    if !contains_token(text, from) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + to.len());
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if is_token_delimiter(c) {
            push_token(&mut out, &text[start..i], from, to);
            out.push(c);
            start = i + c.len_utf8();
        }
    }
    push_token(&mut out, &text[start..], from, to);

    Cow::Owned(out)
}

fn replace_tokens_in_place(text: &mut String, from: &str, to: &str) {
    let rewritten = replace_tokens(text, from, to);
    if let Cow::Owned(rewritten) = rewritten {
        *text = rewritten;
    }
}

fn push_token(out: &mut String, token: &str, from: &str, to: &str) {
    if token == from {
        out.push_str(to);
    } else {
        out.push_str(token);
    }
}
