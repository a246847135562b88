use std::collections::HashMap;
use std::path::Path;

use crate::core::contig::Contig;
use crate::parsing::fasta::read_fasta_file;
use crate::reference::{resolve_interval, LookupError, ReferenceError, ReferenceLookup};

/// Reference sequences held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    contigs: Vec<Contig>,
    sequences: HashMap<String, Vec<u8>>,
}

impl InMemoryReference {
    /// Build from `(name, sequence)` pairs; sequences are upper-cased
    pub fn from_sequences<I, N, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let mut reference = Self::default();
        for (name, sequence) in sequences {
            reference.insert(name.into(), sequence.as_ref().to_ascii_uppercase());
        }
        reference
    }

    /// Load every sequence of a FASTA file (plain or gzip)
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Parse` if the FASTA cannot be read or is empty.
    pub fn from_fasta_file(path: &Path) -> Result<Self, ReferenceError> {
        let mut reference = Self::default();
        for record in read_fasta_file(path)? {
            reference.insert(record.name, record.sequence);
        }
        Ok(reference)
    }

    fn insert(&mut self, name: String, sequence: Vec<u8>) {
        self.contigs
            .push(Contig::new(name.clone()).with_length(sequence.len() as u64));
        self.sequences.insert(name, sequence);
    }
}

impl ReferenceLookup for InMemoryReference {
    fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    fn fetch(&self, chromosome: &str, position: u64, len: usize) -> Result<String, LookupError> {
        let sequence = self
            .sequences
            .get(chromosome)
            .ok_or_else(|| LookupError::UnknownContig(chromosome.to_string()))?;
        let (start, end) = resolve_interval(chromosome, position, len, sequence.len() as u64)?;

        // Bounds were checked against the sequence length above
        #[allow(clippy::cast_possible_truncation)]
        let bases = &sequence[(start - 1) as usize..end as usize];
        Ok(String::from_utf8_lossy(bases).into_owned())
    }
}
