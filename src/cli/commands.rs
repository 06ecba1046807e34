//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::engine::{compare, generate_test_signal, load_wav, save_buffer};
use crate::jobs::{self, OperationReport};
use crate::ops::OperationParams;

/// Insert or mix `add` into `base`.
pub fn combine(
    base: &Path,
    add: &Path,
    output: &Path,
    params: &OperationParams,
    json: bool,
) -> Result<()> {
    info!("Combining ({}) {} + {}", params.mode, base.display(), add.display());

    let report = jobs::combine_files(base, add, output, params)
        .with_context(|| format!("{} failed", params.mode))?;
    print_report(&report, json)
}

/// Remove or unmix `removal` from `combined`.
pub fn separate(
    combined: &Path,
    removal: &Path,
    output: &Path,
    params: &OperationParams,
    json: bool,
) -> Result<()> {
    info!(
        "Separating ({}) {} - {}",
        params.mode,
        combined.display(),
        removal.display()
    );

    let report = jobs::separate_files(combined, removal, output, params)
        .with_context(|| format!("{} failed", params.mode))?;
    print_report(&report, json)
}

/// Run every job in a JSON job file.
pub fn batch(path: &Path, threads: Option<usize>, json: bool) -> Result<()> {
    let job_list = jobs::load_jobs(path)
        .with_context(|| format!("Failed to load jobs from {}", path.display()))?;
    let threads = threads.unwrap_or_else(jobs::default_threads);

    let results = jobs::run_batch(&job_list, threads)?;
    let failed = results.iter().filter(|r| r.is_err()).count();

    if json {
        let entries: Vec<_> = results
            .iter()
            .map(|result| match result {
                Ok(report) => serde_json::json!({ "ok": report }),
                Err(e) => serde_json::json!({ "error": e.to_string(), "code": e.error_code() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for result in &results {
            match result {
                Ok(report) => print_report(report, false)?,
                Err(e) => println!("FAILED: {} ({})", e, e.recovery_hint()),
            }
        }
        println!("{:-<60}", "");
        println!("{} succeeded | {} failed", results.len() - failed, failed);
    }

    if failed > 0 {
        bail!("{} of {} jobs failed", failed, results.len());
    }
    Ok(())
}

/// Write a synthetic test signal.
pub fn generate(output: &Path, samples: usize, sample_rate: u32, seed: u64) -> Result<()> {
    let buffer = generate_test_signal(samples, sample_rate, seed);
    save_buffer(output, &buffer)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Generated {} ({} samples, {:.2}s at {} Hz, seed {})",
        output.display(),
        buffer.len(),
        buffer.duration_secs(),
        sample_rate,
        seed
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    path: &'a Path,
    samples: usize,
    sample_rate: u32,
    duration_secs: f64,
    peak: i32,
    checksum: String,
}

/// Print length, rate, peak and checksum of a file.
pub fn inspect(path: &Path, json: bool) -> Result<()> {
    let buffer =
        load_wav(path).with_context(|| format!("Failed to load {}", path.display()))?;

    let report = InspectReport {
        path,
        samples: buffer.len(),
        sample_rate: buffer.sample_rate,
        duration_secs: buffer.duration_secs(),
        peak: buffer.peak(),
        checksum: buffer.checksum(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File:        {}", path.display());
        println!("Samples:     {}", report.samples);
        println!("Sample rate: {} Hz", report.sample_rate);
        println!("Duration:    {:.3}s", report.duration_secs);
        println!("Peak:        {}", report.peak);
        println!("SHA-256:     {}", report.checksum);
    }
    Ok(())
}

/// Compare two files; fails when they differ beyond `tolerance`.
pub fn compare_files(a: &Path, b: &Path, tolerance: u32, json: bool) -> Result<()> {
    let first = load_wav(a).with_context(|| format!("Failed to load {}", a.display()))?;
    let second = load_wav(b).with_context(|| format!("Failed to load {}", b.display()))?;

    if first.sample_rate != second.sample_rate {
        warn!(
            "Sample rates differ: {} Hz vs {} Hz",
            first.sample_rate, second.sample_rate
        );
    }

    let comparison = compare(&first.samples, &second.samples);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("Lengths:      {} vs {}", comparison.length_a, comparison.length_b);
        println!("Max abs diff: {}", comparison.max_abs_diff);
        println!("Mismatched:   {}", comparison.mismatched);
    }

    if !comparison.within(tolerance) {
        bail!(
            "{} and {} differ beyond tolerance {}",
            a.display(),
            b.display(),
            tolerance
        );
    }
    Ok(())
}

fn print_report(report: &OperationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}: {} + {} -> {} samples at {} Hz",
        report.mode,
        report.input_samples,
        report.signal_samples,
        report.output_samples,
        report.sample_rate
    );
    if let Some(scale) = report.normalization_scale {
        println!("Normalized by {:.4}", scale);
    }
    println!("Output: {} (sha256 {})", report.output.display(), report.checksum);
    Ok(())
}
