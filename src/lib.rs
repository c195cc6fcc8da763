//! The ndarray-linterp crate provides cell based multilinear interpolation
//! of data sampled on rectilinear (tensor product) grids.
//!
//! Every interpolator splits the grid into cells, one per hyper-rectangle
//! spanned by neighbouring grid coordinates. A query is answered by locating
//! the enclosing cell along each axis with an [`Indexer`] and blending the
//! corner values of that cell.
//!
//!  - [`Interp1D`] linear interpolation of scalar samples on one axis
//!  - [`Interp2D`] bilinear interpolation on a two dimensional grid
//!  - [`InterpND`] multilinear interpolation on grids of any rank
//!  - [`Tensor`] the dense storage the cells are built from, with zero copy
//!    sub views via [`Tensor::subview`]
//!
//! # Extrapolation
//! Queries outside the grid are not an error. The indexer clamps them to the
//! first or last cell along the offending axis and that cell's formula is
//! evaluated as is, which extends the edge cell linearly.
//!
//! ```rust
//! # use ndarray::array;
//! # use ndarray_linterp::Interp2D;
//! let data = array![
//!     [1.0, 2.0, 2.0],
//!     [2.0, 3.0, 3.0],
//!     [3.0, 3.0, 4.0],
//! ];
//! let interp = Interp2D::builder(data).build().unwrap();
//! assert_eq!(interp.eval(1.5, 0.5), 2.75);
//! ```
use thiserror::Error;

pub mod cell;
pub mod indexer;
pub mod interp1d;
pub mod interp2d;
pub mod interpnd;
pub mod tensor;
mod vector_extensions;

pub use cell::{Cell, LinearCell1D, LinearCell2D, LinearCellND};
pub use indexer::{IndexMode, Indexer};
pub use interp1d::{Interp1D, Interp1DBuilder};
pub use interp2d::{Interp2D, Interp2DBuilder};
pub use interpnd::{InterpND, InterpNDBuilder};
pub use tensor::{AxisRange, Tensor, TensorError, TensorView, TensorViewMut};

/// Errors raised while validating data and building an interpolator.
/// No interpolator is returned when building fails.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The shape of the data does not match the coordinate arrays,
    /// or the data has the wrong number of axes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    /// An axis has fewer than two samples.
    #[error("not enough data: {0}")]
    NotEnoughData(String),
    /// The coordinates of an axis are not strictly monotonic rising.
    #[error("{0}")]
    Monotonic(String),
    /// The value tensor could not be sliced into cells.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Errors raised when querying an interpolator with malformed input.
///
/// Query coordinates outside the grid are never an error, see the
/// crate level documentation on extrapolation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpolateError {
    /// The query point has a different number of coordinates than the grid has axes.
    #[error("expected a point with {expected} coordinates, got {got}")]
    RankMismatch { expected: usize, got: usize },
    /// Arrays of query coordinates do not have matching shapes.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}
