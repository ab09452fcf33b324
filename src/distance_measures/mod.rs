//! Distance measures.
//!
//! A metric is the composition of three stages applied to the virtual
//! `[N, M, D]` difference tensor `source[i] - target[j]`:
//!
//! | Metric      | Transform | Reduction over D | Closing |
//! |-------------|-----------|------------------|---------|
//! | `SquaredL2` | `d * d`   | sum              | none    |
//! | `L2`        | `d * d`   | sum              | `sqrt`  |
//! | `L1`        | `abs(d)`  | sum              | none    |
//! | `Linf`      | `abs(d)`  | max              | none    |
//!
//! `SquaredL2` returns *squared* Euclidean distance. It ranks identically to
//! `L2` and skips the square root, so it is the default.

mod many_to_many;
mod one_to_one;

pub use many_to_many::{pairwise_distances, DistanceMatrix};
pub use one_to_one::{l1_distance, l2_distance, linf_distance, squared_l2_distance};

pub(crate) use many_to_many::{check_dimensions, compute_block};

use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// Per-element transform applied to each feature difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTransform {
    /// `d * d`
    Square,
    /// `abs(d)`
    Abs,
}

/// Associative, commutative operator reducing the feature axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Sum of transformed differences.
    Sum,
    /// Maximum of transformed differences (NaN-propagating).
    Max,
}

/// Transform applied to the reduced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closing {
    /// Return the reduced value unchanged.
    Identity,
    /// Square root of the reduced value.
    Sqrt,
}

/// The closed set of supported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Squared Euclidean distance: sum of squared differences.
    #[default]
    SquaredL2,

    /// Euclidean distance: square root of the sum of squared differences.
    L2,

    /// Manhattan distance: sum of absolute differences.
    L1,

    /// Chebyshev distance: maximum absolute difference.
    Linf,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 4] = [Metric::SquaredL2, Metric::L2, Metric::L1, Metric::Linf];

    /// Per-element transform.
    pub fn transform(&self) -> ElementTransform {
        match self {
            Metric::SquaredL2 | Metric::L2 => ElementTransform::Square,
            Metric::L1 | Metric::Linf => ElementTransform::Abs,
        }
    }

    /// Reduction along the feature axis.
    pub fn reduction(&self) -> Reduction {
        match self {
            Metric::SquaredL2 | Metric::L2 | Metric::L1 => Reduction::Sum,
            Metric::Linf => Reduction::Max,
        }
    }

    /// Closing transform.
    pub fn closing(&self) -> Closing {
        match self {
            Metric::L2 => Closing::Sqrt,
            _ => Closing::Identity,
        }
    }

    /// Apply the closing transform to a reduced value.
    #[inline]
    pub fn close<T: Scalar>(&self, reduced: T) -> T {
        match self.closing() {
            Closing::Identity => reduced,
            Closing::Sqrt => reduced.sqrt_val(),
        }
    }

    /// Distance between two points of equal dimensionality.
    pub fn distance<T: Scalar>(&self, a: &[T], b: &[T]) -> T {
        match self {
            Metric::SquaredL2 => squared_l2_distance(a, b),
            Metric::L2 => l2_distance(a, b),
            Metric::L1 => l1_distance(a, b),
            Metric::Linf => linf_distance(a, b),
        }
    }

    /// Get the name of this metric.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::SquaredL2 => "squared_l2",
            Metric::L2 => "l2",
            Metric::L1 => "l1",
            Metric::Linf => "linf",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "squared-l2" | "squared_l2" | "sqeuclidean" => Ok(Metric::SquaredL2),
            "l2" | "euclidean" => Ok(Metric::L2),
            "l1" | "manhattan" => Ok(Metric::L1),
            "linf" | "chebyshev" => Ok(Metric::Linf),
            _ => Err(format!("unsupported metric: {s}")),
        }
    }
}
