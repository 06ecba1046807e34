//! Jobs Module
//!
//! File-level entry points and the concurrent batch runner.

pub mod batch;
pub mod runner;

pub use batch::{check_independent, default_threads, load_jobs, run_batch};
pub use runner::{combine_files, run, separate_files, Job, OperationReport};
