use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing::warn;

use crate::cli::{Cli, OutputFormat};
use crate::pipeline::{self, RunConfig, RunOutcome};
use crate::reconcile::{write_report, ReconcileConfig};

/// Execute a reconciliation run
///
/// # Errors
///
/// Returns an error if an input cannot be read, the output already exists, the
/// report cannot be created, or writing the output or index fails.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = RunConfig {
        vcf: cli.vcf.clone(),
        reference: cli.reference.clone(),
        output: cli.output.clone(),
        tmp_dir: cli.tmp_dir.clone(),
        force: cli.force,
        reconcile: ReconcileConfig {
            threads: usize::from(cli.threads),
            ..ReconcileConfig::default()
        },
    };

    if cli.verbose {
        eprintln!(
            "Reconciling {} against {}",
            config.vcf.display(),
            config.reference.display()
        );
    }

    // Created up front so an unwritable report path fails before any output exists
    let report = match &cli.report {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report {}", path.display()))?;
            Some((path.as_path(), file))
        }
        None => None,
    };

    let outcome = match pipeline::run(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some((path, file)) = report {
                drop(file);
                let _ = std::fs::remove_file(path);
            }
            return Err(e.into());
        }
    };

    if let Some((path, file)) = report {
        if let Err(e) = write_report_file(file, cli.format, &outcome) {
            warn!("Failed to write report {}: {e}", path.display());
        }
    }

    match cli.format {
        OutputFormat::Text => print_text_summary(&config, &outcome),
        OutputFormat::Json => print_json_summary(&outcome)?,
        OutputFormat::Tsv => print_tsv_summary(&outcome),
    }

    Ok(())
}

fn write_report_file(file: File, format: OutputFormat, outcome: &RunOutcome) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    write_report(
        &mut writer,
        format.into(),
        &outcome.summary,
        &outcome.diagnostics,
    )?;
    writer.flush()
}

fn print_text_summary(config: &RunConfig, outcome: &RunOutcome) {
    let summary = &outcome.summary;

    println!("Reconciliation Results");
    println!("{}", "=".repeat(60));
    println!("\nInput:     {}", config.vcf.display());
    println!("Reference: {}", config.reference.display());
    println!("Output:    {}", outcome.output.display());
    println!("Index:     {}", outcome.index.display());
    if !outcome.normalizations.is_empty() {
        println!("Normalizations: {}", outcome.normalizations.join(", "));
    }

    println!("\nRecords:");
    println!("  Total:          {}", summary.total);
    println!("  Agreed:         {}", summary.agreed);
    println!("  Swapped:        {}", summary.swapped);
    println!("  Irreconcilable: {}", summary.irreconcilable);
    println!("  Lookup failed:  {}", summary.lookup_failed);
    println!("  Emitted:        {}", summary.emitted);
}

fn print_json_summary(outcome: &RunOutcome) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "output": outcome.output,
        "index": outcome.index,
        "normalizations": outcome.normalizations,
        "summary": outcome.summary,
    });

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &output)?;
    writeln!(handle)?;
    Ok(())
}

fn print_tsv_summary(outcome: &RunOutcome) {
    let summary = &outcome.summary;
    println!("total\tagreed\tswapped\tirreconcilable\tlookup_failed\temitted");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        summary.total,
        summary.agreed,
        summary.swapped,
        summary.irreconcilable,
        summary.lookup_failed,
        summary.emitted
    );
}
