//! Rendering of the diagnostic trail for operator review.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::reconcile::diagnosis::DiagnosticEntry;
use crate::reconcile::engine::ReconcileSummary;

/// Columns of the TSV report
pub const TSV_COLUMNS: [&str; 9] = [
    "line",
    "id",
    "chromosome",
    "position",
    "classification",
    "reference",
    "stated_ref",
    "stated_alt",
    "detail",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ReconcileSummary,
    diagnostics: &'a [DiagnosticEntry],
}

/// Write the summary and every diagnostic entry in `format`
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    format: ReportFormat,
    summary: &ReconcileSummary,
    diagnostics: &[DiagnosticEntry],
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text_report(writer, summary, diagnostics),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(
                &mut *writer,
                &JsonReport {
                    summary,
                    diagnostics,
                },
            )?;
            writeln!(writer)
        }
        ReportFormat::Tsv => write_tsv_report(writer, diagnostics),
    }
}

fn write_text_report<W: Write>(
    writer: &mut W,
    summary: &ReconcileSummary,
    diagnostics: &[DiagnosticEntry],
) -> io::Result<()> {
    writeln!(writer, "Reconciliation Report")?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer, "Records:        {}", summary.total)?;
    writeln!(writer, "Agreed:         {}", summary.agreed)?;
    writeln!(writer, "Swapped:        {}", summary.swapped)?;
    writeln!(writer, "Irreconcilable: {}", summary.irreconcilable)?;
    writeln!(writer, "Lookup failed:  {}", summary.lookup_failed)?;
    writeln!(writer, "Emitted:        {}", summary.emitted)?;

    for diagnostic in diagnostics {
        writeln!(writer)?;
        writeln!(writer, "{diagnostic}")?;
    }
    Ok(())
}

fn write_tsv_report<W: Write>(writer: &mut W, diagnostics: &[DiagnosticEntry]) -> io::Result<()> {
    writeln!(writer, "{}", TSV_COLUMNS.join("\t"))?;
    for d in diagnostics {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            d.line_number,
            d.identifier,
            d.chromosome,
            d.position,
            d.classification,
            d.reference_base.as_deref().unwrap_or("."),
            d.stated_reference,
            d.stated_alternate,
            d.detail.as_deref().unwrap_or(".")
        )?;
    }
    Ok(())
}
