//! Linear interpolation of scalar samples on one axis
//!
//! # Interpolator
//!  - [`Interp1D`] the interpolator
//!  - [`Interp1DBuilder`] configure the interpolator
use std::fmt::Debug;

use ndarray::{Array, Array1, ArrayBase, Data, Dimension, Ix1};
#[cfg(feature = "rayon")]
use ndarray::Zip;
use num_traits::Float;
use tracing::debug;

use crate::{
    cell::LinearCell1D,
    indexer::{IndexMode, Indexer},
    tensor::{Tensor, TensorError},
    BuilderError,
};

/// One dimensional linear interpolator
///
/// Holds one [`LinearCell1D`] per interval of the x axis. Queries left of
/// the first or right of the last x value extend the first or last
/// interval linearly.
#[derive(Debug, Clone)]
pub struct Interp1D<A> {
    indexer: Indexer<A>,
    cells: Vec<LinearCell1D<A>>,
}

impl<A> Interp1D<A>
where
    A: Float + Debug + Send + Sync,
{
    /// Get the [Interp1DBuilder]
    pub fn builder<S>(data: ArrayBase<S, Ix1>) -> Interp1DBuilder<S>
    where
        S: Data<Elem = A>,
    {
        Interp1DBuilder::new(data)
    }

    /// Interpolated value at `x`
    ///
    /// ```rust
    /// # use ndarray_linterp::*;
    /// # use ndarray::*;
    /// let data = array![1.0, 1.5, 2.0];
    /// let x =    array![1.0, 2.0, 3.0];
    ///
    /// let interpolator = Interp1D::builder(data).x(x).build().unwrap();
    /// assert_eq!(interpolator.eval(1.5), 1.25);
    /// // extrapolation of the last interval
    /// assert_eq!(interpolator.eval(4.0), 2.5);
    /// ```
    #[inline]
    pub fn eval(&self, x: A) -> A {
        self.cells[self.indexer.locate(x)].eval_at(x)
    }

    /// Interpolated values at all points in `xs`.
    /// The result has the shape of `xs`, each value at the position of its query.
    ///
    /// ```rust
    /// # use ndarray_linterp::*;
    /// # use ndarray::*;
    /// # use approx::*;
    /// let data =     array![0.0,  0.5, 1.0 ];
    /// let query =    array![[0.5,  1.0], [1.5, 2.0]];
    /// let expected = array![[0.25, 0.5], [0.75, 1.0]];
    ///
    /// let interpolator = Interp1D::builder(data).build().unwrap();
    /// let result = interpolator.evaln(&query);
    /// # assert_abs_diff_eq!(result, expected, epsilon=f64::EPSILON);
    /// ```
    pub fn evaln<Sq, Dq>(&self, xs: &ArrayBase<Sq, Dq>) -> Array<A, Dq>
    where
        Sq: Data<Elem = A>,
        Dq: Dimension,
    {
        #[cfg(not(feature = "rayon"))]
        {
            xs.map(|&x| self.eval(x))
        }
        #[cfg(feature = "rayon")]
        {
            Zip::from(xs).par_map_collect(|&x| self.eval(x))
        }
    }

    /// The index of the cell used to evaluate `x`
    pub fn locate(&self, x: A) -> usize {
        self.indexer.locate(x)
    }

    pub fn indexer(&self) -> &Indexer<A> {
        &self.indexer
    }

    pub fn cell(&self, index: usize) -> Option<&LinearCell1D<A>> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[LinearCell1D<A>] {
        &self.cells
    }

    /// the number of samples
    pub fn len(&self) -> usize {
        self.indexer.coordinates().len()
    }
}

/// Create and configure a [Interp1D] Interpolator.
///
/// # Default configuration
/// The index to the data is used as x values and cells are located
/// with [`IndexMode::Search`].
#[derive(Debug)]
pub struct Interp1DBuilder<S>
where
    S: Data,
    S::Elem: Debug,
{
    x: Option<Array1<S::Elem>>,
    data: ArrayBase<S, Ix1>,
    mode: IndexMode,
}

impl<S, A> Interp1DBuilder<S>
where
    S: Data<Elem = A>,
    A: Float + Debug + Send + Sync,
{
    /// Create a new [Interp1DBuilder] and provide the data to interpolate.
    pub fn new(data: ArrayBase<S, Ix1>) -> Self {
        Interp1DBuilder {
            x: None,
            data,
            mode: IndexMode::default(),
        }
    }

    /// Add a custom x axis for the data. The axis needs to have the same length
    /// as the data and must be strictly monotonic rising.
    /// If the x axis is not set the index `0..data.len()` is used.
    pub fn x<Sx>(mut self, x: ArrayBase<Sx, Ix1>) -> Self
    where
        Sx: Data<Elem = A>,
    {
        self.x = Some(x.to_owned());
        self
    }

    /// Set how the enclosing cell of a query is located.
    /// Only use [`IndexMode::Uniform`] for equidistant x values.
    pub fn index_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate input data and create the configured [Interp1D]
    pub fn build(self) -> Result<Interp1D<A>, BuilderError> {
        let Interp1DBuilder { x, data, mode } = self;

        let indexer = Indexer::for_axis(x, data.len(), "x")?.with_mode(mode);

        let values = Tensor::from_array(&data)?;
        let cells = (0..indexer.cells())
            .map(|idx| {
                let f = values.subview([idx..idx + 2])?;
                let [x0, x1] = indexer.bounds(idx);
                Ok(LinearCell1D::new(x0, x1, f.read(&[0])?, f.read(&[1])?))
            })
            .collect::<Result<Vec<_>, TensorError>>()?;

        debug!(points = data.len(), cells = cells.len(), ?mode, "built 1D interpolator");
        Ok(Interp1D { indexer, cells })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array, Array1};
    use rand::{distr::Uniform, rngs::StdRng, Rng, SeedableRng};

    use super::Interp1D;
    use crate::{BuilderError, IndexMode};

    fn rand_arr(size: usize, range: (f64, f64), seed: u64) -> Array1<f64> {
        Array::from_iter(
            StdRng::seed_from_u64(seed)
                .sample_iter(Uniform::new_inclusive(range.0, range.1).unwrap())
                .take(size),
        )
    }

    #[test]
    fn interp_y_only() {
        let interp = Interp1D::builder(array![1.5, 2.0, 3.0, 4.0, 5.0, 7.0, 7.0, 8.0, 9.0, 10.5])
            .build()
            .unwrap();
        assert_eq!(interp.eval(0.0), 1.5);
        assert_eq!(interp.eval(9.0), 10.5);
        assert_eq!(interp.eval(4.5), 6.0);
        assert_eq!(interp.eval(0.25), 1.625);
        assert_eq!(interp.eval(8.75), 10.125);
    }

    #[test]
    fn cells_cover_intervals() {
        let interp = Interp1D::builder(array![0.0, 2.0, 1.0, 1.0])
            .x(array![0.0, 1.0, 3.0, 4.0])
            .build()
            .unwrap();
        assert_eq!(interp.len(), 4);
        assert_eq!(interp.cells().len(), 3);
        assert_eq!(interp.cell(0).unwrap().slope(), 2.0);
        assert_eq!(interp.cell(1).unwrap().slope(), -0.5);
        assert_eq!(interp.cell(2).unwrap().slope(), 0.0);
        assert!(interp.cell(3).is_none());
        assert_eq!(interp.locate(3.5), 2);
    }

    #[test]
    fn search_and_uniform_agree() {
        let data = rand_arr(20, (-1.0, 1.0), 42);
        let search = Interp1D::builder(data.view()).build().unwrap();
        let uniform = Interp1D::builder(data.view())
            .index_mode(IndexMode::Uniform)
            .build()
            .unwrap();
        let query = rand_arr(500, (-2.0, 21.0), 7);
        assert_eq!(search.evaln(&query), uniform.evaln(&query));
    }

    #[test]
    fn evaln_preserves_order() {
        let interp = Interp1D::builder(rand_arr(10, (0.0, 1.0), 3)).build().unwrap();
        let query = rand_arr(50, (0.0, 9.0), 4);
        let result = interp.evaln(&query);
        for (&x, &y) in query.iter().zip(result.iter()) {
            assert_abs_diff_eq!(interp.eval(x), y, epsilon = f64::EPSILON);
        }
    }

    #[test]
    fn builder_errors() {
        assert!(matches!(
            Interp1D::builder(array![1.0]).build(),
            Err(BuilderError::NotEnoughData(_))
        ));
        assert!(matches!(
            Interp1D::builder(array![1.0, 2.0, 3.0]).x(array![1.0, 2.0]).build(),
            Err(BuilderError::DimensionMismatch(_))
        ));
        assert!(matches!(
            Interp1D::builder(array![1.0, 2.0, 3.0]).x(array![1.0, 3.0, 2.0]).build(),
            Err(BuilderError::Monotonic(_))
        ));
    }
}
