use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use noodles::core::{Position, Region};
use noodles::fasta;
use parking_lot::Mutex;
use tracing::debug;

use crate::core::contig::Contig;
use crate::parsing::fai::{default_index_path, index_to_contigs, read_fai_file};
use crate::reference::{resolve_interval, LookupError, ReferenceError, ReferenceLookup};

type FastaReader = fasta::io::IndexedReader<BufReader<File>>;

/// Random-access lookups into an uncompressed FASTA.
///
/// An existing `<fasta>.fai` is used when present. Otherwise the index is
/// built once in memory at open; nothing is written next to the FASTA.
/// The reader is shared behind a mutex so the lookup can be used from
/// several threads.
pub struct IndexedReference {
    path: PathBuf,
    reader: Mutex<FastaReader>,
    contigs: Vec<Contig>,
    lengths: HashMap<String, u64>,
}

impl IndexedReference {
    /// Open `path`, reading or building its FASTA index
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Io` if the FASTA cannot be read or indexed, or
    /// `ReferenceError::Parse` if an existing `.fai` is malformed or empty.
    pub fn open(path: &Path) -> Result<Self, ReferenceError> {
        let index_path = default_index_path(path);
        let index = if index_path.is_file() {
            debug!("Using FASTA index {}", index_path.display());
            read_fai_file(&index_path)?
        } else {
            debug!("No FASTA index found, indexing {} in memory", path.display());
            fasta::fs::index(path)?
        };

        let contigs = index_to_contigs(&index)?;
        let lengths = contigs
            .iter()
            .map(|c| (c.name.clone(), c.length.unwrap_or(0)))
            .collect();

        let inner = File::open(path).map(BufReader::new)?;
        let reader = fasta::io::IndexedReader::new(inner, index);

        Ok(Self {
            path: path.to_path_buf(),
            reader: Mutex::new(reader),
            contigs,
            lengths,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceLookup for IndexedReference {
    fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    fn fetch(&self, chromosome: &str, position: u64, len: usize) -> Result<String, LookupError> {
        let length = *self
            .lengths
            .get(chromosome)
            .ok_or_else(|| LookupError::UnknownContig(chromosome.to_string()))?;
        let (start, end) = resolve_interval(chromosome, position, len, length)?;

        let to_position = |value: u64| {
            usize::try_from(value)
                .ok()
                .and_then(Position::new)
                .ok_or_else(|| LookupError::PositionOutOfBounds {
                    contig: chromosome.to_string(),
                    position: value,
                    length,
                })
        };
        let region = Region::new(chromosome, to_position(start)?..=to_position(end)?);

        let record = self.reader.lock().query(&region)?;
        let bases = record.sequence().as_ref();
        if bases.is_empty() {
            return Err(LookupError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no bases returned for {chromosome}:{start}-{end}"),
            )));
        }

        Ok(bases
            .iter()
            .map(|&b| char::from(b.to_ascii_uppercase()))
            .collect())
    }
}
