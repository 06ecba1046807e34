//! CLI Module
//!
//! Command-line interface for Splicer.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::generate::DEFAULT_SAMPLE_RATE;
use crate::ops::{Operation, DEFAULT_MIX_BALANCE};

/// Splicer - insert, mix, remove and unmix mono 16-bit WAV signals
#[derive(Parser, Debug)]
#[command(name = "splicer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert or mix a signal into a base signal
    Combine {
        /// Operation to perform
        #[arg(value_enum)]
        mode: CombineMode,

        /// Base WAV file
        #[arg(short, long)]
        base: PathBuf,

        /// WAV file to insert or mix in
        #[arg(short, long)]
        add: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Sample offset into the base
        #[arg(short, long, allow_negative_numbers = true)]
        position: i64,

        /// Weight given to the added signal (mix only)
        #[arg(long, default_value_t = DEFAULT_MIX_BALANCE, allow_negative_numbers = true)]
        balance: f64,

        /// Leading samples of the added signal to skip
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        add_offset: i64,

        /// Rescale the mix so its peak reaches full scale
        #[arg(long)]
        normalize: bool,
    },

    /// Remove or unmix a signal from a combined signal
    Separate {
        /// Operation to perform
        #[arg(value_enum)]
        mode: SeparateMode,

        /// Combined WAV file
        #[arg(short, long)]
        combined: PathBuf,

        /// WAV file that was inserted or mixed in
        #[arg(short, long)]
        removal: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Sample offset used when combining
        #[arg(short, long, allow_negative_numbers = true)]
        position: i64,

        /// Weight the removal was mixed in with (unmix only)
        #[arg(long, default_value_t = DEFAULT_MIX_BALANCE, allow_negative_numbers = true)]
        balance: f64,
    },

    /// Run a JSON file of jobs concurrently
    Batch {
        /// JSON array of jobs
        jobs: PathBuf,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Write a synthetic test signal
    Generate {
        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of samples
        #[arg(short = 'n', long)]
        samples: usize,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Noise seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Show length, rate, peak and checksum of a WAV file
    Inspect {
        /// WAV file
        path: PathBuf,
    },

    /// Compare two WAV files sample by sample
    Compare {
        /// First WAV file
        a: PathBuf,

        /// Second WAV file
        b: PathBuf,

        /// Largest allowed per-sample difference
        #[arg(short, long, default_value_t = 2)]
        tolerance: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombineMode {
    Insert,
    Mix,
}

impl From<CombineMode> for Operation {
    fn from(mode: CombineMode) -> Self {
        match mode {
            CombineMode::Insert => Operation::Insert,
            CombineMode::Mix => Operation::Mix,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeparateMode {
    Remove,
    Unmix,
}

impl From<SeparateMode> for Operation {
    fn from(mode: SeparateMode) -> Self {
        match mode {
            SeparateMode::Remove => Operation::Remove,
            SeparateMode::Unmix => Operation::Unmix,
        }
    }
}
