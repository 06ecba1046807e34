//! Combiner: insert and mix
//!
//! Both operations borrow their inputs and return a new sequence. Insert is
//! a pure splice and never loses information; mix is a weighted sum narrowed
//! back to 16-bit samples.

use log::{debug, warn};

use crate::ops::numeric::{clamp_position, effective_slice, narrow, saturates};
use crate::ops::CombineOp;

/// Combine `add` into `base` at `position`
///
/// # Arguments
/// * `base` - Sequence to start from
/// * `add` - Sequence to insert or mix in
/// * `position` - Sample offset into `base`
/// * `op` - Insert or mix, with their parameters
///
/// # Returns
/// A newly allocated combined sequence
///
/// # Example
/// ```
/// use splicer::ops::{combine, CombineOp};
///
/// let base = [10, 20, 30, 40, 50];
/// let add = [100, 100];
///
/// let inserted = combine(&base, &add, 2, CombineOp::insert());
/// assert_eq!(inserted, vec![10, 20, 100, 100, 30, 40, 50]);
///
/// let mixed = combine(&base, &add, 2, CombineOp::mix(0.5));
/// assert_eq!(mixed, vec![10, 20, 65, 70, 50]);
/// ```
pub fn combine(base: &[i16], add: &[i16], position: usize, op: CombineOp) -> Vec<i16> {
    match op {
        CombineOp::Insert { add_offset } => insert(base, effective_slice(add, add_offset), position),
        CombineOp::Mix {
            mix_balance,
            add_offset,
        } => mix(base, effective_slice(add, add_offset), position, mix_balance),
    }
}

/// Splice `add` into `base`. Positions past the end append.
fn insert(base: &[i16], add: &[i16], position: usize) -> Vec<i16> {
    let split = clamp_position(position, base.len());
    if split != position {
        debug!(
            "insert: position {} past end of base ({}), appending",
            position,
            base.len()
        );
    }

    let mut result = Vec::with_capacity(base.len() + add.len());
    result.extend_from_slice(&base[..split]);
    result.extend_from_slice(add);
    result.extend_from_slice(&base[split..]);
    result
}

/// Weighted sum of `base` and `add` over `[position, position + add.len())`,
/// zero-padding `base` when the region runs past its end.
fn mix(base: &[i16], add: &[i16], position: usize, mix_balance: f64) -> Vec<i16> {
    let mut result = base.to_vec();
    let end = position.saturating_add(add.len());

    if end > result.len() {
        debug!("mix: padding base from {} to {} samples", result.len(), end);
        result.resize(end, 0);
    }

    let weight_base = 1.0 - mix_balance;
    let weight_add = mix_balance;
    let mut saturated = 0usize;

    for (slot, &add_sample) in result[position..end].iter_mut().zip(add) {
        let value = weight_base * f64::from(*slot) + weight_add * f64::from(add_sample);
        if saturates(value) {
            saturated += 1;
        }
        *slot = narrow(value);
    }

    if saturated > 0 {
        warn!(
            "mix: {} samples saturated at balance {}",
            saturated, mix_balance
        );
    }

    result
}
