//! Audio Engine Module
//!
//! Everything around the core operations:
//! - Sample buffers and measurements
//! - WAV file I/O
//! - Synthetic test signals

pub mod buffer;
pub mod generate;
pub mod io;

pub use buffer::{checksum, compare, Comparison, SampleBuffer};
pub use generate::generate_test_signal;
pub use io::{load_wav, save_buffer, save_wav};
