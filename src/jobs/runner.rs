//! File-level operations
//!
//! Load two inputs, run one validated operation, save the result with the
//! first input's sample rate. Parameters are validated before any file is
//! opened, and the output is only written once the result is complete.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::{checksum, load_wav, save_wav};
use crate::error::{Result, SplicerError};
use crate::ops::numeric::peak;
use crate::ops::{Operation, OperationParams, Plan};

/// One operation over two files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Base (insert/mix) or combined (remove/unmix) file
    pub input: PathBuf,
    /// Additive (insert/mix) or removal (remove/unmix) file
    pub signal: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub params: OperationParams,
}

/// Summary of a completed operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationReport {
    pub mode: Operation,
    pub output: PathBuf,
    pub input_samples: usize,
    pub signal_samples: usize,
    pub output_samples: usize,
    pub sample_rate: u32,
    pub peak: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization_scale: Option<f64>,
    /// SHA-256 of the output samples
    pub checksum: String,
}

/// Insert or mix `add_path` into `base_path`, writing `output_path`
///
/// # Errors
/// * `InvalidArgument` - If `params` is not a valid insert/mix request
/// * `Io` / `Decode` - If either input cannot be loaded
/// * `AudioWrite` / `Io` - If the output cannot be written
pub fn combine_files(
    base_path: &Path,
    add_path: &Path,
    output_path: &Path,
    params: &OperationParams,
) -> Result<OperationReport> {
    if !params.mode.is_combine() {
        return Err(SplicerError::invalid_argument(format!(
            "{} is not a combine operation",
            params.mode
        )));
    }
    execute(base_path, add_path, output_path, params)
}

/// Remove or unmix `removal_path` from `combined_path`, writing `output_path`
///
/// # Errors
/// * `InvalidArgument` - If `params` is not a valid remove/unmix request
/// * `Io` / `Decode` - If either input cannot be loaded
/// * `AudioWrite` / `Io` - If the output cannot be written
pub fn separate_files(
    combined_path: &Path,
    removal_path: &Path,
    output_path: &Path,
    params: &OperationParams,
) -> Result<OperationReport> {
    if params.mode.is_combine() {
        return Err(SplicerError::invalid_argument(format!(
            "{} is not a separate operation",
            params.mode
        )));
    }
    execute(combined_path, removal_path, output_path, params)
}

/// Run a job, dispatching on its mode
pub fn run(job: &Job) -> Result<OperationReport> {
    execute(&job.input, &job.signal, &job.output, &job.params)
}

fn execute(
    input_path: &Path,
    signal_path: &Path,
    output_path: &Path,
    params: &OperationParams,
) -> Result<OperationReport> {
    let plan = params.plan()?;

    let input = load_wav(input_path)?;
    let signal = load_wav(signal_path)?;

    if input.sample_rate != signal.sample_rate {
        warn!(
            "Sample rate mismatch: {} is {} Hz, {} is {} Hz; keeping {} Hz",
            input_path.display(),
            input.sample_rate,
            signal_path.display(),
            signal.sample_rate,
            input.sample_rate
        );
    }

    if let Plan::Combine { op, .. } = plan {
        if op.add_offset() >= signal.len() && !signal.is_empty() {
            warn!(
                "add_offset {} skips all {} samples of {}",
                op.add_offset(),
                signal.len(),
                signal_path.display()
            );
        }
    }

    let (result, normalization_scale) = plan.apply(&input.samples, &signal.samples);
    save_wav(output_path, &result, input.sample_rate)?;

    info!(
        "{} at {}: {} + {} samples -> {} samples",
        params.mode,
        params.position,
        input.len(),
        signal.len(),
        result.len()
    );

    Ok(OperationReport {
        mode: params.mode,
        output: output_path.to_path_buf(),
        input_samples: input.len(),
        signal_samples: signal.len(),
        output_samples: result.len(),
        sample_rate: input.sample_rate,
        peak: peak(&result),
        normalization_scale,
        checksum: checksum(&result),
    })
}
