use num_traits::Float;

use super::Cell;

/// Linear interpolation between two samples `(x0, f0)` and `(x1, f1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCell1D<A> {
    x0: A,
    f0: A,
    slope: A,
}

impl<A: Float> LinearCell1D<A> {
    pub fn new(x0: A, x1: A, f0: A, f1: A) -> Self {
        LinearCell1D {
            x0,
            f0,
            slope: (f1 - f0) / (x1 - x0),
        }
    }

    /// `f0 + slope * (x - x0)`
    #[inline]
    pub fn eval_at(&self, x: A) -> A {
        self.f0 + self.slope * (x - self.x0)
    }

    pub fn slope(&self) -> A {
        self.slope
    }
}

impl<A: Float> Cell<A> for LinearCell1D<A> {
    fn ndim(&self) -> usize {
        1
    }

    fn eval(&self, point: &[A]) -> A {
        self.eval_at(point[0])
    }
}
