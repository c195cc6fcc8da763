//! Lookup of the grid cell enclosing a query coordinate along one axis.
//!
//! An [`Indexer`] is built from the sorted coordinates `x` of one axis.
//! With `L = x.len()` the valid cell indices are `0..=L-2`, cell `i` being
//! the interval `[x[i], x[i+1])`. Queries outside the grid are clamped:
//!  - `q < x[0]` resolves to cell `0`
//!  - `q >= x[L-1]` resolves to cell `L-2`
//!
//! Two lookup modes exist:
//!  - [`sort_index`](Indexer::sort_index) bisection, correct for any grid, `O(log L)`
//!  - [`cell_index`](Indexer::cell_index) direct computation assuming equidistant
//!    coordinates, `O(1)`
use std::fmt::Debug;

use ndarray::{Array1, ArrayBase, Data, Ix1};
use num_traits::{cast, Float};
use tracing::warn;

use crate::{
    vector_extensions::{Monotonic, VectorExtensions},
    BuilderError,
};

/// How an [`Indexer`] resolves query coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Bisection, works for every strictly rising grid.
    #[default]
    Search,
    /// Constant time lookup for equidistant grids.
    ///
    /// The grid is not checked on every query; on non equidistant grids
    /// the returned cells drift away from the enclosing ones.
    Uniform,
}

/// Maps a coordinate to the index of the enclosing cell along one axis.
#[derive(Debug, Clone)]
pub struct Indexer<A> {
    /// guaranteed to be strictly monotonic rising with at least 2 values
    x: Array1<A>,
    x_front: A,
    x_back: A,
    /// the mean step `(x_back - x_front) / (L - 1)`
    x_delta: A,
    mode: IndexMode,
}

impl<A> Indexer<A>
where
    A: Float + Debug,
{
    /// Validate `x` and create an indexer using [`IndexMode::Search`].
    ///
    /// # Errors
    ///  - [`BuilderError::NotEnoughData`] when `x` has less than two values
    ///  - [`BuilderError::Monotonic`] when `x` is not strictly monotonic rising
    pub fn new<S>(x: ArrayBase<S, Ix1>) -> Result<Self, BuilderError>
    where
        S: Data<Elem = A>,
    {
        if x.len() < 2 {
            return Err(BuilderError::NotEnoughData(format!(
                "an axis needs at least 2 coordinates, got {}",
                x.len()
            )));
        }
        if !matches!(x.monotonic_prop(), Monotonic::Rising { strict: true }) {
            return Err(BuilderError::Monotonic(
                "Values in the coordinate axis need to be strictly monotonic rising".into(),
            ));
        }

        let x = x.to_owned();
        let len = x.len();
        let x_front = x[0];
        let x_back = x[len - 1];
        let steps: A = cast(len - 1).unwrap_or_else(|| unimplemented!());
        Ok(Indexer {
            x_delta: (x_back - x_front) / steps,
            x,
            x_front,
            x_back,
            mode: IndexMode::Search,
        })
    }

    /// Indexer with the coordinates `0, 1, .., len-1`
    pub fn from_len(len: usize) -> Result<Self, BuilderError> {
        Self::new(Array1::from_iter((0..len).map(|n| {
            cast(n).unwrap_or_else(|| {
                unimplemented!("casting from usize to a number should always work")
            })
        })))
    }

    /// Indexer for a data axis of length `len` named `name`, built from
    /// `coords` or the index when no coordinates are given.
    ///
    /// # Errors
    ///  - [`BuilderError::NotEnoughData`] when `len < 2`
    ///  - [`BuilderError::DimensionMismatch`] when `coords` does not have `len` values
    ///  - [`BuilderError::Monotonic`] see [`new`](Indexer::new)
    pub(crate) fn for_axis(
        coords: Option<Array1<A>>,
        len: usize,
        name: &str,
    ) -> Result<Self, BuilderError> {
        if len < 2 {
            return Err(BuilderError::NotEnoughData(format!(
                "interpolation needs at least 2 data points along {name}, got {len}"
            )));
        }
        match coords {
            Some(coords) if coords.len() != len => Err(BuilderError::DimensionMismatch(format!(
                "Lengths of {name} and data axis need to match. Got {name}: {}, data: {len}",
                coords.len()
            ))),
            Some(coords) => Self::new(coords),
            None => Self::from_len(len),
        }
    }

    /// Set the lookup mode used by [`locate`](Indexer::locate).
    pub fn with_mode(mut self, mode: IndexMode) -> Self {
        if mode == IndexMode::Uniform && !self.is_uniform() {
            warn!(
                len = self.x.len(),
                "uniform index mode selected for a non equidistant axis, cell lookup will drift"
            );
        }
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// The index of the enclosing cell using the configured [`IndexMode`].
    #[inline]
    pub fn locate(&self, x: A) -> usize {
        match self.mode {
            IndexMode::Search => self.sort_index(x),
            IndexMode::Uniform => self.cell_index(x),
        }
    }

    /// Constant time lookup assuming equidistant coordinates.
    ///
    /// Computes `floor((x - x_front) / x_delta)` and clamps the result to
    /// the valid cell indices. For non equidistant coordinates the result is
    /// unspecified, use [`sort_index`](Indexer::sort_index) for those.
    /// `NaN` resolves to the last cell.
    #[inline]
    pub fn cell_index(&self, x: A) -> usize {
        if x >= self.x_back || x.is_nan() {
            return self.index_back();
        }
        if x < self.x_front {
            return self.index_front();
        }
        ((x - self.x_front) / self.x_delta)
            .floor()
            .to_usize()
            .map_or(self.index_back(), |idx| idx.min(self.index_back()))
    }

    /// Bisection for the right most coordinate `<= x`, clamped to the
    /// valid cell indices. `NaN` resolves to the last cell.
    #[inline]
    pub fn sort_index(&self, x: A) -> usize {
        if x >= self.x_back || x.is_nan() {
            return self.index_back();
        }
        if x < self.x_front {
            return self.index_front();
        }
        // x_front <= x < x_back, so the upper bound is in 1..len
        self.x.upper_bound(x) - 1
    }

    /// the first valid cell index, always `0`
    pub fn index_front(&self) -> usize {
        0
    }

    /// the last valid cell index, `len - 2`
    pub fn index_back(&self) -> usize {
        self.x.len() - 2
    }

    /// number of cells along this axis
    pub fn cells(&self) -> usize {
        self.x.len() - 1
    }

    pub fn x_front(&self) -> A {
        self.x_front
    }

    pub fn x_back(&self) -> A {
        self.x_back
    }

    pub fn coordinates(&self) -> &Array1<A> {
        &self.x
    }

    /// lower and upper coordinate of cell `index`
    ///
    /// # panics
    /// when `index > self.index_back()`
    pub fn bounds(&self, index: usize) -> [A; 2] {
        [self.x[index], self.x[index + 1]]
    }

    pub fn is_in_range(&self, x: A) -> bool {
        self.x_front <= x && x <= self.x_back
    }

    /// whether the coordinates are equidistant, see [`IndexMode::Uniform`]
    pub fn is_uniform(&self) -> bool {
        self.x.is_linspaced()
    }
}
