//! Bilinear interpolation on a two dimensional grid
//!
//! # Interpolator
//!  - [`Interp2D`] the interpolator
//!  - [`Interp2DBuilder`] configure the interpolator
use std::fmt::Debug;

use ndarray::{Array, Array1, Array2, ArrayBase, Data, Dimension, Ix1, Ix2, Zip};
use num_traits::Float;
use tracing::debug;

use crate::{
    cell::LinearCell2D,
    indexer::{IndexMode, Indexer},
    tensor::Tensor,
    BuilderError, InterpolateError,
};

/// Two dimensional bilinear interpolator
///
/// The data is indexed as `data[[i, j]] = f(x[i], y[j])`. One
/// [`LinearCell2D`] is kept per grid rectangle in an array of shape
/// `(x.len() - 1, y.len() - 1)`.
#[derive(Debug, Clone)]
pub struct Interp2D<A> {
    x_indexer: Indexer<A>,
    y_indexer: Indexer<A>,
    cells: Array2<LinearCell2D<A>>,
}

impl<A> Interp2D<A>
where
    A: Float + Debug + Send + Sync,
{
    /// Get the [Interp2DBuilder]
    pub fn builder<S>(data: ArrayBase<S, Ix2>) -> Interp2DBuilder<S>
    where
        S: Data<Elem = A>,
    {
        Interp2DBuilder::new(data)
    }

    /// Interpolated value at `(x, y)`
    ///
    /// ```rust
    /// # use ndarray_linterp::*;
    /// # use ndarray::*;
    /// let data = array![
    ///     [1.0, 2.0, 2.0],
    ///     [2.0, 3.0, 3.0],
    ///     [3.0, 3.0, 4.0],
    /// ];
    /// let interpolator = Interp2D::builder(data)
    ///     .x(array![0.0, 1.0, 2.0])
    ///     .y(array![0.0, 1.0, 2.0])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(interpolator.eval(0.5, 0.5), 2.0);
    /// assert_eq!(interpolator.eval(1.5, 0.5), 2.75);
    /// ```
    #[inline]
    pub fn eval(&self, x: A, y: A) -> A {
        self.cells[self.locate(x, y)].eval_at(x, y)
    }

    /// Interpolated values at the points `(xs[i], ys[i])`.
    ///
    /// `xs` and `ys` must have the same shape, which is also the shape of the result.
    ///
    /// # Errors
    /// [`InterpolateError::ShapeMismatch`] when the shapes of `xs` and `ys` differ
    pub fn evaln<Sx, Sy, Dq>(
        &self,
        xs: &ArrayBase<Sx, Dq>,
        ys: &ArrayBase<Sy, Dq>,
    ) -> Result<Array<A, Dq>, InterpolateError>
    where
        Sx: Data<Elem = A>,
        Sy: Data<Elem = A>,
        Dq: Dimension,
    {
        if xs.shape() != ys.shape() {
            return Err(InterpolateError::ShapeMismatch(format!(
                "x and y queries need the same shape, got x: {:?}, y: {:?}",
                xs.shape(),
                ys.shape()
            )));
        }
        let zip = Zip::from(xs).and(ys);
        #[cfg(not(feature = "rayon"))]
        let zs = zip.map_collect(|&x, &y| self.eval(x, y));
        #[cfg(feature = "rayon")]
        let zs = zip.par_map_collect(|&x, &y| self.eval(x, y));
        Ok(zs)
    }

    /// The `[x, y]` index of the cell used to evaluate `(x, y)`
    pub fn locate(&self, x: A, y: A) -> [usize; 2] {
        [self.x_indexer.locate(x), self.y_indexer.locate(y)]
    }

    pub fn x_indexer(&self) -> &Indexer<A> {
        &self.x_indexer
    }

    pub fn y_indexer(&self) -> &Indexer<A> {
        &self.y_indexer
    }

    pub fn cell(&self, index: [usize; 2]) -> Option<&LinearCell2D<A>> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &Array2<LinearCell2D<A>> {
        &self.cells
    }

    /// number of grid points along x and y
    pub fn shape(&self) -> [usize; 2] {
        [
            self.x_indexer.coordinates().len(),
            self.y_indexer.coordinates().len(),
        ]
    }
}

/// Create and configure a [Interp2D] Interpolator.
///
/// # Default configuration
/// The indices to `Axis(0)` and `Axis(1)` of the data are used as
/// x and y values, cells are located with [`IndexMode::Search`].
#[derive(Debug)]
pub struct Interp2DBuilder<S>
where
    S: Data,
    S::Elem: Debug,
{
    x: Option<Array1<S::Elem>>,
    y: Option<Array1<S::Elem>>,
    data: ArrayBase<S, Ix2>,
    mode: IndexMode,
}

impl<S, A> Interp2DBuilder<S>
where
    S: Data<Elem = A>,
    A: Float + Debug + Send + Sync,
{
    /// Create a new [Interp2DBuilder] and provide the data to interpolate.
    pub fn new(data: ArrayBase<S, Ix2>) -> Self {
        Interp2DBuilder {
            x: None,
            y: None,
            data,
            mode: IndexMode::default(),
        }
    }

    /// Coordinates along `Axis(0)` of the data, strictly monotonic rising.
    pub fn x<Sx>(mut self, x: ArrayBase<Sx, Ix1>) -> Self
    where
        Sx: Data<Elem = A>,
    {
        self.x = Some(x.to_owned());
        self
    }

    /// Coordinates along `Axis(1)` of the data, strictly monotonic rising.
    pub fn y<Sy>(mut self, y: ArrayBase<Sy, Ix1>) -> Self
    where
        Sy: Data<Elem = A>,
    {
        self.y = Some(y.to_owned());
        self
    }

    /// Set how the enclosing cell of a query is located on both axes.
    /// Only use [`IndexMode::Uniform`] for equidistant coordinates.
    pub fn index_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate input data and create the configured [Interp2D]
    pub fn build(self) -> Result<Interp2D<A>, BuilderError> {
        let Interp2DBuilder { x, y, data, mode } = self;
        let (x_len, y_len) = data.dim();

        let x_indexer = Indexer::for_axis(x, x_len, "x")?.with_mode(mode);
        let y_indexer = Indexer::for_axis(y, y_len, "y")?.with_mode(mode);

        let values = Tensor::from_array(&data)?;
        let mut cells = Vec::with_capacity(x_indexer.cells() * y_indexer.cells());
        for i in 0..x_indexer.cells() {
            for j in 0..y_indexer.cells() {
                let f = values.subview([i..i + 2, j..j + 2])?;
                cells.push(LinearCell2D::new(
                    x_indexer.bounds(i),
                    y_indexer.bounds(j),
                    &f,
                )?);
            }
        }
        let cells = Array::from_shape_vec((x_indexer.cells(), y_indexer.cells()), cells)
            .unwrap_or_else(|_| unreachable!());

        debug!(shape = ?data.shape(), cells = cells.len(), ?mode, "built 2D interpolator");
        Ok(Interp2D {
            x_indexer,
            y_indexer,
            cells,
        })
    }
}
