//! Separator: remove and unmix
//!
//! The inverses of insert and mix. Remove is exact. Unmix recovers the base
//! within rounding tolerance when given the same position and balance that
//! were used to mix, and never extends the combined sequence.

use log::{debug, warn};

use crate::ops::numeric::{clamp_position, narrow, overlap_end, saturates};
use crate::ops::SeparateOp;

/// Separate `removal` from `combined` at `position`
///
/// # Arguments
/// * `combined` - Output of an earlier insert or mix
/// * `removal` - The sequence that was inserted or mixed in
/// * `position` - Sample offset used when combining
/// * `op` - Remove or unmix, with its parameters
///
/// # Returns
/// A newly allocated sequence approximating the original base
///
/// # Example
/// ```
/// use splicer::ops::{separate, SeparateOp};
///
/// let combined = [10, 20, 65, 70, 40, 50];
/// let removal = [100, 100];
///
/// let recovered = separate(&combined, &removal, 2, SeparateOp::unmix(0.5));
/// assert_eq!(recovered, vec![10, 20, 30, 40, 40, 50]);
///
/// let removed = separate(&combined, &removal, 2, SeparateOp::Remove);
/// assert_eq!(removed, vec![10, 20, 40, 50]);
/// ```
pub fn separate(combined: &[i16], removal: &[i16], position: usize, op: SeparateOp) -> Vec<i16> {
    match op {
        SeparateOp::Remove => remove(combined, removal.len(), position),
        SeparateOp::Unmix { mix_balance } => unmix(combined, removal, position, mix_balance),
    }
}

/// Drop `removal_len` samples starting at `position`
fn remove(combined: &[i16], removal_len: usize, position: usize) -> Vec<i16> {
    let start = clamp_position(position, combined.len());
    let end = clamp_position(position.saturating_add(removal_len), combined.len());

    if end - start < removal_len {
        debug!(
            "remove: only {} of {} samples available at position {}",
            end - start,
            removal_len,
            position
        );
    }

    let mut result = Vec::with_capacity(combined.len() - (end - start));
    result.extend_from_slice(&combined[..start]);
    result.extend_from_slice(&combined[end..]);
    result
}

/// Subtract the weighted `removal` from the overlap and rescale by the base
/// weight. A zero base weight zeroes the overlap.
fn unmix(combined: &[i16], removal: &[i16], position: usize, mix_balance: f64) -> Vec<i16> {
    let mut result = combined.to_vec();
    let end = overlap_end(position, removal.len(), combined.len());
    if end <= position {
        debug!(
            "unmix: position {} leaves no overlap with {} samples",
            position,
            combined.len()
        );
        return result;
    }

    let overlap_length = end - position;
    if overlap_length < removal.len() {
        debug!(
            "unmix: overlap truncated to {} of {} samples",
            overlap_length,
            removal.len()
        );
    }

    let weight_add = mix_balance;
    let weight_base = 1.0 - mix_balance;
    let overlap = &mut result[position..end];

    if weight_base == 0.0 {
        debug!("unmix: base weight is zero, zeroing overlap");
        overlap.fill(0);
        return result;
    }

    let mut saturated = 0usize;
    for (slot, &removal_sample) in overlap.iter_mut().zip(removal) {
        let value = (f64::from(*slot) - weight_add * f64::from(removal_sample)) / weight_base;
        if saturates(value) {
            saturated += 1;
        }
        *slot = narrow(value);
    }

    if saturated > 0 {
        warn!(
            "unmix: {} samples saturated at balance {}",
            saturated, mix_balance
        );
    }

    result
}
