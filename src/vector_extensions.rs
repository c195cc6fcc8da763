use std::fmt::Debug;

use ndarray::{ArrayBase, Data, Ix1};
use num_traits::{cast, Float};

/// Properties and lookups of sorted coordinate vectors
pub trait VectorExtensions<T> {
    /// get the monotonic property of the vector
    fn monotonic_prop(&self) -> Monotonic;

    /// are the values linearly spaced, within a relative tolerance
    /// of the mean step
    fn is_linspaced(&self) -> bool;

    /// Number of values `<= x`, the upper bound of `x`.
    ///
    /// The vector must be sorted. `NaN` is never `<=` anything, so it
    /// is treated as larger than every value.
    fn upper_bound(&self, x: T) -> usize;
}

/// Describes the monotonic property of a vector
#[derive(Debug, PartialEq, Eq)]
pub enum Monotonic {
    Rising { strict: bool },
    Falling { strict: bool },
    NotMonotonic,
}

impl<S, T> VectorExtensions<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
    T: Float + Debug,
{
    fn monotonic_prop(&self) -> Monotonic {
        if self.len() <= 1 {
            return Monotonic::NotMonotonic;
        }

        #[derive(Clone, Copy)]
        struct State {
            rising: bool,
            falling: bool,
            strict: bool,
        }

        let state = self.windows(2).into_iter().fold(
            State {
                rising: true,
                falling: true,
                strict: true,
            },
            |mut state, pair| {
                let (a, b) = (pair[0], pair[1]);
                if a < b {
                    state.falling = false;
                } else if a > b {
                    state.rising = false;
                } else if a == b {
                    state.strict = false;
                } else {
                    // NaN in the vector
                    state.rising = false;
                    state.falling = false;
                }
                state
            },
        );

        match state {
            State { rising: true, falling: true, .. } => Monotonic::Rising { strict: false },
            State { rising: true, strict, .. } => Monotonic::Rising { strict },
            State { falling: true, strict, .. } => Monotonic::Falling { strict },
            _ => Monotonic::NotMonotonic,
        }
    }

    fn is_linspaced(&self) -> bool {
        let len = self.len();
        if len < 3 {
            return len == 2;
        }
        let first = self[0];
        let last = self[len - 1];
        let steps: T = cast(len - 1).unwrap_or_else(|| unimplemented!());
        let delta = (last - first) / steps;
        let tolerance = delta.abs() * cast(1e-6).unwrap_or_else(|| unimplemented!());
        self.windows(2)
            .into_iter()
            .all(|pair| ((pair[1] - pair[0]) - delta).abs() <= tolerance)
    }

    fn upper_bound(&self, x: T) -> usize {
        // do bisection
        let mut range = (0usize, self.len());
        while range.0 < range.1 {
            let mid_idx = range.0 + (range.1 - range.0) / 2;
            if self[mid_idx] <= x {
                range.0 = mid_idx + 1;
            } else {
                range.1 = mid_idx;
            }
        }
        range.0
    }
}
