//! Synthetic test signals
//!
//! Deterministic material for benchmarks and round-trip checks: three
//! low-frequency sines plus seeded noise, scaled to leave some headroom.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::buffer::SampleBuffer;
use crate::ops::narrow;

/// Default sample rate for generated signals
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Peak amplitude of generated signals
pub const TARGET_PEAK: f64 = 28000.0;

/// (frequency Hz, amplitude) of the sine components
const PARTIALS: [(f64, f64); 3] = [(100.0, 0.3), (250.0, 0.2), (500.0, 0.15)];

/// Amplitude of the uniform noise component
const NOISE_AMPLITUDE: f64 = 0.1;

/// Generate a test signal
///
/// The same `seed` always yields the same samples.
///
/// # Arguments
/// * `num_samples` - Length of the signal
/// * `sample_rate` - Sample rate the partials are computed against
/// * `seed` - Noise seed
pub fn generate_test_signal(num_samples: usize, sample_rate: u32, seed: u64) -> SampleBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let rate = f64::from(sample_rate.max(1));

    let raw: Vec<f64> = (0..num_samples)
        .map(|i| {
            let t = i as f64 / rate;
            let tones: f64 = PARTIALS
                .iter()
                .map(|&(freq, amp)| amp * (2.0 * std::f64::consts::PI * freq * t).sin())
                .sum();
            tones + NOISE_AMPLITUDE * rng.gen_range(-1.0..1.0)
        })
        .collect();

    let peak = raw.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    let scale = if peak > 0.0 { TARGET_PEAK / peak } else { 0.0 };

    let samples = raw.into_iter().map(|s| narrow(s * scale)).collect();
    SampleBuffer::new(samples, sample_rate)
}
