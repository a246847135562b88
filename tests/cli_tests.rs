//! Command-line tests for the ref-reconcile binary.

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::{file_names, read_output, write_fasta, write_vcf, MAJOR_MINOR_VCF, RECONCILED_VCF};

fn cmd() -> Command {
    Command::cargo_bin("ref-reconcile").unwrap()
}

#[test]
fn test_reconcile_text_summary() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Swapped:        1"))
        .stdout(predicate::str::contains("Emitted:        3"))
        .stderr(predicate::str::contains("Swapped REF/ALT at chr1:100"))
        .stderr(predicate::str::contains("Dropped irreconcilable record at chr1:300"))
        .stderr(predicate::str::contains("reference lookup failed"));

    assert_eq!(read_output(&output), RECONCILED_VCF);
    assert_eq!(
        file_names(dir.path()),
        vec!["in.vcf", "out.vcf.gz", "out.vcf.gz.tbi", "ref.fa"]
    );
}

#[test]
fn test_json_summary() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");

    let assert = cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .args(["--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["summary"]["total"], 5);
    assert_eq!(json["summary"]["swapped"], 1);
    assert_eq!(json["summary"]["lookup_failed"], 1);
    assert_eq!(json["summary"]["emitted"], 3);
}

#[test]
fn test_tsv_report_file() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");
    let report = dir.path().join("report.tsv");

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .args(["-f", "tsv", "--threads", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("total\tagreed"));

    let report = fs::read_to_string(&report).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("7\trs1\tchr1\t100\tswapped\tG\tA\tG"));
    assert!(lines[2].starts_with("9\trs3\tchr1\t300\tirreconcilable\tC"));
    assert!(lines[3].starts_with("11\trs5\tchr2\t60\tlookup_failed\t."));
}

#[test]
fn test_missing_required_argument() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_unwritable_report_fails_before_output() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(dir.path().join("missing").join("report.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create report"));

    assert_eq!(file_names(dir.path()), vec!["in.vcf", "ref.fa"]);
}

#[test]
fn test_failed_run_removes_report() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");
    fs::write(&output, b"keep me").unwrap();

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(dir.path().join("report.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(file_names(dir.path()), vec!["in.vcf", "out.vcf.gz", "ref.fa"]);
}

#[test]
fn test_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let fasta = write_fasta(dir.path());

    cmd()
        .arg("--vcf")
        .arg(dir.path().join("missing.vcf"))
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(dir.path().join("out.vcf.gz"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn test_existing_output_requires_force() {
    let dir = TempDir::new().unwrap();
    let vcf = write_vcf(dir.path(), "in.vcf", MAJOR_MINOR_VCF);
    let fasta = write_fasta(dir.path());
    let output = dir.path().join("out.vcf.gz");
    fs::write(&output, b"keep me").unwrap();

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read(&output).unwrap(), b"keep me");

    cmd()
        .arg("--vcf")
        .arg(&vcf)
        .arg("--reference")
        .arg(&fasta)
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();
    assert_eq!(read_output(&output), RECONCILED_VCF);
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--reference"))
        .stdout(predicate::str::contains("--tmp-dir"));
}
