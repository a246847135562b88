use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use noodles::bgzf;
use noodles::tabix;
use noodles::vcf;
use tracing::debug;

use crate::core::header::HeaderBlock;
use crate::core::record::VariantRecord;
use crate::output::assembler::Assembler;
use crate::output::OutputError;

/// Write the assembled VCF to `path` as BGZF
///
/// # Errors
///
/// Returns `OutputError::Io` if the file cannot be created or written.
pub fn write_bgzf_vcf(
    path: &Path,
    assembler: &Assembler<'_>,
    header: &HeaderBlock,
    records: &[VariantRecord],
) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = bgzf::io::Writer::new(BufWriter::new(file));
    assembler.write(&mut writer, header, records)?;
    let mut inner = writer.finish()?;
    inner.flush()?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Build a tabix index for the BGZF VCF at `vcf_path` and write it to
/// `index_path`
///
/// # Errors
///
/// Returns `OutputError::Index` if the VCF cannot be indexed (for example,
/// records out of coordinate order) or `OutputError::Io` if writing fails.
pub fn write_tabix_index(vcf_path: &Path, index_path: &Path) -> Result<(), OutputError> {
    let index = vcf::fs::index(vcf_path).map_err(|source| OutputError::Index {
        path: vcf_path.to_path_buf(),
        source,
    })?;
    tabix::fs::write(index_path, &index)?;
    debug!("Wrote tabix index {}", index_path.display());
    Ok(())
}
