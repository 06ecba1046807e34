//! Batch runner
//!
//! Jobs run concurrently on a rayon pool, so a job file must describe
//! independent jobs: no two jobs share an output, and no job reads another
//! job's output. [`load_jobs`] rejects files that break either rule. A
//! failing job does not stop the others; results come back in job order.

use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use log::{debug, error, info};
use rayon::prelude::*;

use crate::error::{Result, SplicerError};
use crate::jobs::runner::{run, Job, OperationReport};

/// Read a JSON array of independent jobs
///
/// # Errors
/// * `Serialization` - If the file is not a JSON array of jobs
/// * `InvalidArgument` - If two jobs write the same output, or a job reads
///   a file another job writes
pub fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    let content = fs::read_to_string(path)?;
    let jobs: Vec<Job> = serde_json::from_str(&content)?;
    check_independent(&jobs)?;
    debug!("Loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Reject job lists whose jobs would race on a shared file
///
/// Paths are compared as written.
pub fn check_independent(jobs: &[Job]) -> Result<()> {
    let mut outputs: HashMap<&Path, usize> = HashMap::new();
    for (index, job) in jobs.iter().enumerate() {
        if let Some(first) = outputs.insert(job.output.as_path(), index) {
            return Err(SplicerError::invalid_argument(format!(
                "jobs {} and {} both write {}",
                first,
                index,
                job.output.display()
            )));
        }
    }

    for (index, job) in jobs.iter().enumerate() {
        for input in [&job.input, &job.signal] {
            if let Some(&writer) = outputs.get(input.as_path()) {
                return Err(SplicerError::invalid_argument(format!(
                    "job {} reads {}, which job {} writes",
                    index,
                    input.display(),
                    writer
                )));
            }
        }
    }
    Ok(())
}

/// Worker count to use when the caller does not specify one
pub fn default_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run every job, at most `threads` at a time
///
/// # Returns
/// One result per job, in job order. Failures are wrapped in
/// `SplicerError::JobFailed` carrying the job index.
///
/// # Errors
/// * `ThreadPool` - If the worker pool cannot be started
pub fn run_batch(jobs: &[Job], threads: usize) -> Result<Vec<Result<OperationReport>>> {
    let workers = threads.clamp(1, jobs.len().max(1));
    info!("Running {} jobs on {} threads", jobs.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|idx| format!("splicer-job-{idx}"))
        .build()?;

    Ok(pool.install(|| {
        jobs.par_iter()
            .enumerate()
            .map(|(index, job)| run_job(index, job))
            .collect()
    }))
}

fn run_job(index: usize, job: &Job) -> Result<OperationReport> {
    run(job).map_err(|e| {
        error!("Job {} ({}) failed: {}", index, job.output.display(), e);
        SplicerError::JobFailed {
            index,
            source: Box::new(e),
        }
    })
}
