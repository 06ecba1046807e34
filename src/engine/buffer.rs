//! Sample Buffer
//!
//! A single-channel sequence of 16-bit samples together with the sample rate
//! it was recorded at, plus the measurements the CLI reports about it.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::ops::numeric::peak;

/// Mono 16-bit sample sequence with its sample rate
///
/// The sample rate is carried through operations untouched; nothing in the
/// core interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        SampleBuffer {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds. Zero when the sample rate is zero.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Absolute peak, 0..=32768
    pub fn peak(&self) -> i32 {
        peak(&self.samples)
    }

    /// SHA-256 of the samples as little-endian bytes, hex encoded
    pub fn checksum(&self) -> String {
        checksum(&self.samples)
    }
}

/// SHA-256 of a sample sequence as little-endian bytes, hex encoded
///
/// Independent of the container header, so two files holding the same
/// samples hash identically.
pub fn checksum(samples: &[i16]) -> String {
    let mut hasher = Sha256::new();
    for sample in samples {
        hasher.update(sample.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// Comparison
// ============================================================================

/// Sample-by-sample difference between two sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub length_a: usize,
    pub length_b: usize,
    /// Largest absolute difference over the common prefix
    pub max_abs_diff: u32,
    /// Samples in the common prefix that differ at all
    pub mismatched: usize,
}

impl Comparison {
    /// Same length and no sample further apart than `tolerance`
    pub fn within(&self, tolerance: u32) -> bool {
        self.length_a == self.length_b && self.max_abs_diff <= tolerance
    }
}

/// Compare two sequences over their common prefix
pub fn compare(a: &[i16], b: &[i16]) -> Comparison {
    let (max_abs_diff, mismatched) = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (i32::from(x) - i32::from(y)).unsigned_abs())
        .fold((0u32, 0usize), |(max, count), diff| {
            (max.max(diff), count + usize::from(diff != 0))
        });

    Comparison {
        length_a: a.len(),
        length_b: b.len(),
        max_abs_diff,
        mismatched,
    }
}
