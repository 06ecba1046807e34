//! Numeric policy shared by the combine and separate operations
//!
//! Floating-point intermediates are narrowed back to 16-bit samples by
//! rounding half to even and then saturating to `[i16::MIN, i16::MAX]`.
//! Mix, unmix and peak normalization all use the same rule so that a
//! mix/unmix round trip stays within integer rounding tolerance.

use log::debug;

// ============================================================================
// Constants
// ============================================================================

/// Smallest representable sample, as a float
pub const SAMPLE_MIN: f64 = i16::MIN as f64;

/// Largest representable sample, as a float
pub const SAMPLE_MAX: f64 = i16::MAX as f64;

// ============================================================================
// Narrowing
// ============================================================================

/// Narrow a floating-point sample value to `i16`
///
/// Rounds half to even, then saturates to the representable range.
/// NaN narrows to 0.
///
/// # Arguments
/// * `value` - Intermediate sample value
///
/// # Returns
/// The nearest representable sample
#[inline]
pub fn narrow(value: f64) -> i16 {
    // `as` saturates and maps NaN to 0
    value.round_ties_even().clamp(SAMPLE_MIN, SAMPLE_MAX) as i16
}

/// Whether narrowing `value` has to saturate
#[inline]
pub fn saturates(value: f64) -> bool {
    let rounded = value.round_ties_even();
    rounded < SAMPLE_MIN || rounded > SAMPLE_MAX
}

// ============================================================================
// Index bookkeeping
// ============================================================================

/// The part of `add` that takes part in insert/mix after skipping
/// `add_offset` leading samples. Empty when the offset reaches past the end.
#[inline]
pub fn effective_slice(add: &[i16], add_offset: usize) -> &[i16] {
    add.get(add_offset..).unwrap_or(&[])
}

/// Clamp a position to a sequence length. Positions past the end split at
/// the end instead of faulting.
#[inline]
pub fn clamp_position(position: usize, len: usize) -> usize {
    position.min(len)
}

/// End of the unmix overlap region, clamped to the combined length
#[inline]
pub fn overlap_end(position: usize, removal_len: usize, combined_len: usize) -> usize {
    position.saturating_add(removal_len).min(combined_len)
}

// ============================================================================
// Peak normalization
// ============================================================================

/// Absolute peak of a sequence
///
/// Computed in `i32` so that `i16::MIN` reports 32768.
pub fn peak(samples: &[i16]) -> i32 {
    samples
        .iter()
        .map(|&s| i32::from(s).abs())
        .max()
        .unwrap_or(0)
}

/// Rescale a sequence in place so its absolute peak becomes `i16::MAX`
///
/// Sign and relative shape are preserved up to rounding. A silent sequence
/// is left untouched.
///
/// # Returns
/// The scale factor applied, or `None` when the sequence was silent
pub fn normalize_peak(samples: &mut [i16]) -> Option<f64> {
    let peak = peak(samples);
    if peak == 0 {
        debug!("normalize: sequence is silent, leaving unchanged");
        return None;
    }

    let scale = SAMPLE_MAX / f64::from(peak);
    for sample in samples.iter_mut() {
        *sample = narrow(f64::from(*sample) * scale);
    }

    debug!("normalize: peak {} rescaled by {:.6}", peak, scale);
    Some(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_rounds_half_to_even() {
        assert_eq!(narrow(65.5), 66);
        assert_eq!(narrow(64.5), 64);
        assert_eq!(narrow(-2.5), -2);
        assert_eq!(narrow(29.9999), 30);
        assert_eq!(narrow(-0.4), 0);
    }

    #[test]
    fn test_narrow_saturates() {
        assert_eq!(narrow(40000.0), i16::MAX);
        assert_eq!(narrow(-40000.0), i16::MIN);
        assert_eq!(narrow(32767.4), i16::MAX);
        assert_eq!(narrow(f64::INFINITY), i16::MAX);
        assert_eq!(narrow(f64::NAN), 0);

        assert!(saturates(32767.6));
        assert!(saturates(-32768.6));
        assert!(!saturates(32767.4));
        assert!(!saturates(-32768.4));
    }

    #[test]
    fn test_effective_slice_skips_offset() {
        let add = [1, 2, 3, 4];
        assert_eq!(effective_slice(&add, 0), &[1, 2, 3, 4]);
        assert_eq!(effective_slice(&add, 2), &[3, 4]);
        assert!(effective_slice(&add, 4).is_empty());
        assert!(effective_slice(&add, 100).is_empty());
    }

    #[test]
    fn test_overlap_end_clamps_to_combined() {
        assert_eq!(overlap_end(2, 2, 6), 4);
        assert_eq!(overlap_end(5, 4, 6), 6);
        assert_eq!(overlap_end(10, 4, 6), 6);
        assert_eq!(overlap_end(usize::MAX, 4, 6), 6);
    }

    #[test]
    fn test_peak_handles_min_sample() {
        assert_eq!(peak(&[]), 0);
        assert_eq!(peak(&[3, -7, 5]), 7);
        assert_eq!(peak(&[i16::MIN, 10]), 32768);
    }

    #[test]
    fn test_normalize_peak_reaches_max() {
        let mut samples = vec![100, -200, 50, 0];
        let scale = normalize_peak(&mut samples).unwrap();

        assert!((scale - 32767.0 / 200.0).abs() < 1e-9);
        assert_eq!(samples[1], -i16::MAX);
        assert!((16383..=16384).contains(&samples[0]));
        assert!((8191..=8192).contains(&samples[2]));
        assert_eq!(samples[3], 0);
        assert_eq!(peak(&samples), i32::from(i16::MAX));
    }

    #[test]
    fn test_normalize_peak_with_min_sample() {
        let mut samples = vec![i16::MIN, 16384];
        normalize_peak(&mut samples).unwrap();
        assert_eq!(samples[0], -i16::MAX);
        assert!(samples[1] > 16000 && samples[1] < 16400);
    }

    #[test]
    fn test_normalize_silence_is_noop() {
        let mut samples = vec![0; 8];
        assert!(normalize_peak(&mut samples).is_none());
        assert!(samples.iter().all(|&s| s == 0));

        let mut empty: Vec<i16> = Vec::new();
        assert!(normalize_peak(&mut empty).is_none());
    }
}
