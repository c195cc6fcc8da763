use num_traits::Float;

use super::Cell;
use crate::tensor::{TensorError, TensorView};

/// Multilinear interpolation on a hyper-rectangle of any rank `N`.
///
/// The value at `p` is
/// ```text
/// H * Σ_c f(c) * Π_k w_k(c_k)
/// ```
/// summed over all `2^N` corners `c`, with `w_k(0) = x_k1 - p_k`,
/// `w_k(1) = p_k - x_k0` and `H = Π_k 1 / (x_k1 - x_k0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCellND<A> {
    /// lower and upper coordinate of each axis
    bounds: Vec<[A; 2]>,
    /// corner values in row-major corner order, the bit of axis 0 is the most significant
    f: Vec<A>,
    h: A,
}

impl<A: Float> LinearCellND<A> {
    /// Create a cell from the coordinate bounds of every axis and a
    /// `2x2x..x2` view of the corner values.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] when `f` is not of shape `[2; bounds.len()]`
    pub fn new(bounds: Vec<[A; 2]>, f: &TensorView<'_, A>) -> Result<Self, TensorError> {
        if f.ndim() != bounds.len() || f.shape().iter().any(|&extent| extent != 2) {
            return Err(TensorError::InvalidShape(f.shape().to_vec()));
        }
        let h = bounds
            .iter()
            .fold(A::one(), |h, &[lo, hi]| h * (hi - lo).recip());
        Ok(LinearCellND {
            f: f.iter().copied().collect(),
            bounds,
            h,
        })
    }

    /// lower and upper coordinate of each axis
    pub fn bounds(&self) -> &[[A; 2]] {
        &self.bounds
    }

    /// corner values in row-major order
    pub fn corners(&self) -> &[A] {
        &self.f
    }
}

impl<A: Float> Cell<A> for LinearCellND<A> {
    fn ndim(&self) -> usize {
        self.bounds.len()
    }

    fn eval(&self, point: &[A]) -> A {
        let ndim = self.bounds.len();
        let point = &point[..ndim];
        let sum = self
            .f
            .iter()
            .enumerate()
            .fold(A::zero(), |sum, (corner, &value)| {
                let weight = self.bounds.iter().zip(point).enumerate().fold(
                    A::one(),
                    |weight, (axis, (&[lo, hi], &p))| {
                        if (corner >> (ndim - 1 - axis)) & 1 == 0 {
                            weight * (hi - p)
                        } else {
                            weight * (p - lo)
                        }
                    },
                );
                sum + value * weight
            });
        self.h * sum
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::LinearCellND;
    use crate::{
        cell::{Cell, LinearCell2D},
        tensor::{Tensor, TensorError},
    };

    #[test]
    fn agrees_with_bilinear() {
        let f = Tensor::from_shape_vec(vec![2, 2], vec![1.0, 2.0, 5.0, -1.0]).unwrap();
        let nd = LinearCellND::new(vec![[0.0, 2.0], [1.0, 1.5]], &f.view()).unwrap();
        let bilinear = LinearCell2D::new([0.0, 2.0], [1.0, 1.5], &f.view()).unwrap();
        for (x, y) in [(0.0, 1.0), (1.0, 1.25), (0.3, 1.4), (2.0, 1.5), (-1.0, 2.0)] {
            assert_abs_diff_eq!(nd.eval(&[x, y]), bilinear.eval_at(x, y), epsilon = 1e-12);
        }
    }

    #[test]
    fn trilinear_corners_and_center() {
        let f = Tensor::from_shape_vec(vec![2, 2, 2], (0..8).map(f64::from).collect()).unwrap();
        let cell = LinearCellND::new(vec![[0.0, 1.0]; 3], &f.view()).unwrap();
        assert_eq!(cell.ndim(), 3);
        for corner in 0..8usize {
            let point = [
                ((corner >> 2) & 1) as f64,
                ((corner >> 1) & 1) as f64,
                (corner & 1) as f64,
            ];
            assert_abs_diff_eq!(cell.eval(&point), corner as f64, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(cell.eval(&[0.5, 0.5, 0.5]), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn reproduces_linear_functions() {
        // f = 1 + 2x - y + 0.5z + 3w
        let bounds = vec![[0.0, 1.0], [-1.0, 1.0], [2.0, 4.0], [0.5, 0.75]];
        let values = (0..16usize)
            .map(|corner| {
                let c = |axis: usize| bounds[axis][(corner >> (3 - axis)) & 1];
                1.0 + 2.0 * c(0) - c(1) + 0.5 * c(2) + 3.0 * c(3)
            })
            .collect();
        let f = Tensor::from_shape_vec(vec![2; 4], values).unwrap();
        let cell = LinearCellND::new(bounds, &f.view()).unwrap();
        let p = [0.25, 0.0, 3.5, 0.6];
        let expect = 1.0 + 2.0 * p[0] - p[1] + 0.5 * p[2] + 3.0 * p[3];
        assert_abs_diff_eq!(cell.eval(&p), expect, epsilon = 1e-12);
    }

    #[test]
    fn wrong_view_shape() {
        let f = Tensor::from_shape_vec(vec![2, 3], vec![0.0; 6]).unwrap();
        assert_eq!(
            LinearCellND::new(vec![[0.0, 1.0]; 2], &f.view()).unwrap_err(),
            TensorError::InvalidShape(vec![2, 3])
        );
        assert_eq!(
            LinearCellND::new(vec![[0.0, 1.0]; 3], &f.subview([0..2, 0..2]).unwrap()).unwrap_err(),
            TensorError::InvalidShape(vec![2, 2])
        );
    }
}
