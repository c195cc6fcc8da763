use num_traits::Float;

use super::Cell;
use crate::tensor::{TensorError, TensorView};

/// Bilinear interpolation on the rectangle `[x0, x1] x [y0, y1]`.
///
/// The value at `(px, py)` is the sum of every corner value weighted by
/// the area of the sub-rectangle opposite to that corner, scaled by
/// `H = 1 / ((x1 - x0) * (y1 - y0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCell2D<A> {
    x: [A; 2],
    y: [A; 2],
    /// corner values, `f[i][j]` belongs to `(x[i], y[j])`
    f: [[A; 2]; 2],
    h: A,
}

impl<A: Float> LinearCell2D<A> {
    /// Create a cell from its corner coordinates and a `2x2` view of the
    /// corner values, `f[[i, j]]` being the value at `(x[i], y[j])`.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] when `f` does not have the shape `[2, 2]`
    pub fn new(x: [A; 2], y: [A; 2], f: &TensorView<'_, A>) -> Result<Self, TensorError> {
        if f.shape() != [2, 2] {
            return Err(TensorError::InvalidShape(f.shape().to_vec()));
        }
        let f = [
            [f.read(&[0, 0])?, f.read(&[0, 1])?],
            [f.read(&[1, 0])?, f.read(&[1, 1])?],
        ];
        Ok(Self::from_corners(x, y, f))
    }

    /// Create a cell from corner values, `f[i][j]` being the value at `(x[i], y[j])`.
    pub fn from_corners(x: [A; 2], y: [A; 2], f: [[A; 2]; 2]) -> Self {
        let h = ((x[1] - x[0]) * (y[1] - y[0])).recip();
        LinearCell2D { x, y, f, h }
    }

    #[inline]
    pub fn eval_at(&self, px: A, py: A) -> A {
        let px_x0 = px - self.x[0];
        let x1_px = self.x[1] - px;
        let py_y0 = py - self.y[0];
        let y1_py = self.y[1] - py;
        self.h
            * (self.f[0][0] * x1_px * y1_py
                + self.f[0][1] * x1_px * py_y0
                + self.f[1][0] * px_x0 * y1_py
                + self.f[1][1] * px_x0 * py_y0)
    }
}

impl<A: Float> Cell<A> for LinearCell2D<A> {
    fn ndim(&self) -> usize {
        2
    }

    fn eval(&self, point: &[A]) -> A {
        self.eval_at(point[0], point[1])
    }
}
