//! Signal Operations
//!
//! The combine/separate core and the typed parameters that drive it:
//! - Combiner: insert, mix
//! - Separator: remove, unmix
//! - Shared numeric policy (narrowing, overlap clamp, peak normalization)

pub mod combine;
pub mod numeric;
pub mod separate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplicerError};

pub use combine::combine;
pub use numeric::{narrow, normalize_peak};
pub use separate::separate;

/// Weight given to the added signal when none is specified
pub const DEFAULT_MIX_BALANCE: f64 = 0.5;

/// Largest accepted position: the most 16-bit samples a WAV data chunk
/// (sized by a `u32` byte count) can hold
pub const MAX_POSITION: i64 = (u32::MAX / 2) as i64;

// ============================================================================
// Operation modes
// ============================================================================

/// The four supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Mix,
    Remove,
    Unmix,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Insert,
        Operation::Mix,
        Operation::Remove,
        Operation::Unmix,
    ];

    /// Lowercase name used on the command line and in job files
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Mix => "mix",
            Operation::Remove => "remove",
            Operation::Unmix => "unmix",
        }
    }

    /// Whether this is a Combiner operation (insert or mix)
    pub fn is_combine(&self) -> bool {
        matches!(self, Operation::Insert | Operation::Mix)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SplicerError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SplicerError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Combiner operation with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombineOp {
    /// Splice the additive sequence in at the position
    Insert { add_offset: usize },
    /// Weighted sum with the base over the overlap region
    Mix { mix_balance: f64, add_offset: usize },
}

impl CombineOp {
    pub fn insert() -> Self {
        CombineOp::Insert { add_offset: 0 }
    }

    pub fn mix(mix_balance: f64) -> Self {
        CombineOp::Mix {
            mix_balance,
            add_offset: 0,
        }
    }

    pub fn add_offset(&self) -> usize {
        match *self {
            CombineOp::Insert { add_offset } | CombineOp::Mix { add_offset, .. } => add_offset,
        }
    }
}

/// Separator operation with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeparateOp {
    /// Cut the removal's length out at the position
    Remove,
    /// Invert a mix made with the same balance
    Unmix { mix_balance: f64 },
}

impl SeparateOp {
    pub fn unmix(mix_balance: f64) -> Self {
        SeparateOp::Unmix { mix_balance }
    }
}

// ============================================================================
// Invocation parameters
// ============================================================================

fn default_mix_balance() -> f64 {
    DEFAULT_MIX_BALANCE
}

/// Untrusted operation parameters as they arrive from the CLI or a job file
///
/// Positions are signed here so that a negative value can be reported
/// instead of wrapping. Call [`OperationParams::plan`] to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationParams {
    pub mode: Operation,
    pub position: i64,
    #[serde(default = "default_mix_balance")]
    pub mix_balance: f64,
    #[serde(default)]
    pub add_offset: i64,
    #[serde(default)]
    pub normalize: bool,
}

impl OperationParams {
    /// Parameters for `mode` at `position` with every option at its default
    pub fn new(mode: Operation, position: i64) -> Self {
        OperationParams {
            mode,
            position,
            mix_balance: DEFAULT_MIX_BALANCE,
            add_offset: 0,
            normalize: false,
        }
    }

    pub fn with_mix_balance(mut self, mix_balance: f64) -> Self {
        self.mix_balance = mix_balance;
        self
    }

    pub fn with_add_offset(mut self, add_offset: i64) -> Self {
        self.add_offset = add_offset;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Validate the parameters into an executable [`Plan`]
    ///
    /// # Errors
    /// * `InvalidArgument` - negative position or add-offset, position past
    ///   [`MAX_POSITION`], non-finite balance, add-offset on remove/unmix,
    ///   normalize on anything but mix
    pub fn plan(&self) -> Result<Plan> {
        let position = non_negative("position", self.position)?;
        if self.position > MAX_POSITION {
            return Err(SplicerError::invalid_argument(format!(
                "position {} exceeds the longest WAV file ({} samples)",
                self.position, MAX_POSITION
            )));
        }
        let add_offset = non_negative("add_offset", self.add_offset)?;

        let uses_balance = matches!(self.mode, Operation::Mix | Operation::Unmix);
        if uses_balance && !self.mix_balance.is_finite() {
            return Err(SplicerError::invalid_argument(format!(
                "mix_balance must be finite, got {}",
                self.mix_balance
            )));
        }

        if self.normalize && self.mode != Operation::Mix {
            return Err(SplicerError::invalid_argument(format!(
                "normalize only applies to mix, not {}",
                self.mode
            )));
        }

        if add_offset != 0 && !self.mode.is_combine() {
            return Err(SplicerError::invalid_argument(format!(
                "add_offset only applies to insert and mix, not {}",
                self.mode
            )));
        }

        let plan = match self.mode {
            Operation::Insert => Plan::Combine {
                position,
                op: CombineOp::Insert { add_offset },
                normalize: false,
            },
            Operation::Mix => Plan::Combine {
                position,
                op: CombineOp::Mix {
                    mix_balance: self.mix_balance,
                    add_offset,
                },
                normalize: self.normalize,
            },
            Operation::Remove => Plan::Separate {
                position,
                op: SeparateOp::Remove,
            },
            Operation::Unmix => Plan::Separate {
                position,
                op: SeparateOp::Unmix {
                    mix_balance: self.mix_balance,
                },
            },
        };

        Ok(plan)
    }
}

fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        SplicerError::invalid_argument(format!("{} must be non-negative, got {}", name, value))
    })
}

/// A validated operation, ready to run against two sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Plan {
    Combine {
        position: usize,
        op: CombineOp,
        normalize: bool,
    },
    Separate {
        position: usize,
        op: SeparateOp,
    },
}

impl Plan {
    /// Run the plan. `first` is the base (combine) or combined (separate)
    /// sequence, `second` the additive or removal sequence.
    ///
    /// # Returns
    /// The output sequence and the normalization scale, if one was applied
    pub fn apply(&self, first: &[i16], second: &[i16]) -> (Vec<i16>, Option<f64>) {
        match *self {
            Plan::Combine {
                position,
                op,
                normalize,
            } => {
                let mut result = combine(first, second, position, op);
                let scale = if normalize {
                    normalize_peak(&mut result)
                } else {
                    None
                };
                (result, scale)
            }
            Plan::Separate { position, op } => (separate(first, second, position, op), None),
        }
    }
}
