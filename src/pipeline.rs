//! End-to-end run: decode, reconcile, assemble, compress, index.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::core::store::VariantStore;
use crate::output::writer::{write_bgzf_vcf, write_tabix_index};
use crate::output::{Assembler, OutputError, Workspace};
use crate::parsing::ParseError;
use crate::reconcile::{
    DiagnosticEntry, ReconcileConfig, ReconcileSummary, ReconciliationEngine,
};
use crate::reference::{open_reference, ReferenceError};

/// Inputs and options for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub vcf: PathBuf,
    pub reference: PathBuf,
    pub output: PathBuf,

    /// Directory for the scratch workspace; defaults to the output's directory
    pub tmp_dir: Option<PathBuf>,

    /// Overwrite an existing output and index
    pub force: bool,

    pub reconcile: ReconcileConfig,
}

impl RunConfig {
    pub fn new(
        vcf: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vcf: vcf.into(),
            reference: reference.into(),
            output: output.into(),
            tmp_dir: None,
            force: false,
            reconcile: ReconcileConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to read VCF: {0}")]
    Input(#[from] ParseError),

    #[error("Failed to open reference: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Environment conflict at {path}: {reason}")]
    EnvironmentConflict { path: PathBuf, reason: String },

    #[error("Failed to write output: {0}")]
    Output(#[source] OutputError),
}

impl From<OutputError> for RunError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::AlreadyExists { path } => Self::EnvironmentConflict {
                path,
                reason: "already exists (use --force to overwrite)".to_string(),
            },
            other => Self::Output(other),
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output: PathBuf,
    pub index: PathBuf,
    pub summary: ReconcileSummary,
    pub diagnostics: Vec<DiagnosticEntry>,

    /// Names of the invertible normalizations that were applied and undone
    pub normalizations: Vec<&'static str>,
}

/// Run the whole pipeline.
///
/// The output and index only appear once both are complete; on any error the
/// scratch workspace is removed and nothing is left at the output path.
///
/// # Errors
///
/// Returns `RunError::EnvironmentConflict` before any input is read if the
/// output already exists without `force`, `RunError::Output` if the scratch
/// workspace cannot be created or the output cannot be written, and
/// `RunError::Input` / `RunError::Reference` for unreadable inputs.
pub fn run(config: &RunConfig) -> Result<RunOutcome, RunError> {
    let workspace = Workspace::prepare(&config.output, config.tmp_dir.as_deref(), config.force)?;

    let reference = open_reference(&config.reference)?;
    info!(
        "Opened reference {} ({} contigs)",
        config.reference.display(),
        reference.contigs().len()
    );

    let store = VariantStore::open(
        &config.vcf,
        reference.contigs(),
        &config.reconcile.normalization,
    )?;
    let VariantStore {
        header,
        records,
        normalizations,
    } = store;

    let engine = ReconciliationEngine::new(config.reconcile.clone());
    let reconciliation = engine.reconcile(records, &*reference);

    let assembler = Assembler::new(&normalizations);
    write_bgzf_vcf(
        &workspace.staged_output(),
        &assembler,
        &header,
        &reconciliation.records,
    )?;
    write_tabix_index(&workspace.staged_output(), &workspace.staged_index())?;

    let output = workspace.output().to_path_buf();
    let index = workspace.index().to_path_buf();
    workspace.persist()?;
    info!(
        "Wrote {} records to {} (index {})",
        reconciliation.summary.emitted,
        output.display(),
        index.display()
    );

    Ok(RunOutcome {
        output,
        index,
        summary: reconciliation.summary,
        diagnostics: reconciliation.diagnostics,
        normalizations: normalizations.active().iter().map(|n| n.name()).collect(),
    })
}
