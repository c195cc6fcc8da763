//! Interpolation cells, one per hyper-rectangle of the grid.
//!
//! # Cells
//!  - [`LinearCell1D`] linear interpolation on an interval
//!  - [`LinearCell2D`] bilinear interpolation on a rectangle
//!  - [`LinearCellND`] multilinear interpolation on a hyper-rectangle of any rank
//!
//! All cells compute their normalisation constants once in `new`.
//! A cell does not check whether a point lies inside of it, for points
//! outside the same formula extrapolates linearly.

mod bilinear;
mod linear;
mod multilinear;

pub use bilinear::LinearCell2D;
pub use linear::LinearCell1D;
pub use multilinear::LinearCellND;

/// Evaluation of a single grid cell.
pub trait Cell<A> {
    /// number of axes of the cell
    fn ndim(&self) -> usize;

    /// Interpolated value at `point`.
    ///
    /// # panics
    /// when `point` has less than [`ndim`](Cell::ndim) coordinates
    fn eval(&self, point: &[A]) -> A;
}
