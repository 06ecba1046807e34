//! Splicer - Reversible Signal Combination
//!
//! Splicer inserts or mixes one mono 16-bit sample sequence into another at
//! an arbitrary offset, and inverts those operations:
//! 1. Combiner - `insert` splices, `mix` sums with a weight
//! 2. Separator - `remove` cuts out, `unmix` subtracts and rescales
//!
//! # Architecture
//!
//! - `ops`: the pure in-memory core over `&[i16]`
//! - `engine`: sample buffers, WAV I/O, synthetic test signals
//! - `jobs`: file-level entry points and batch processing
//! - `cli`: the command-line front end

pub mod cli;
pub mod engine;
pub mod error;
pub mod jobs;
pub mod ops;

pub use engine::SampleBuffer;
pub use error::{Result, SplicerError};
pub use ops::{combine, separate, CombineOp, Operation, OperationParams, SeparateOp};
