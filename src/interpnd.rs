//! Multilinear interpolation on rectilinear grids of any rank
//!
//! # Interpolator
//!  - [`InterpND`] the interpolator
//!  - [`InterpNDBuilder`] configure the interpolator
//!
//! Besides the builder an interpolator can be created directly from a
//! [`Tensor`] of values with [`InterpND::from_tensor`].
use std::fmt::Debug;

use ndarray::{
    indices, Array, Array1, ArrayBase, ArrayD, ArrayView1, Data, Dimension, Ix1, Ix2, IxDyn, Zip,
};
use num_traits::Float;
use tracing::debug;

use crate::{
    cell::{Cell, LinearCellND},
    indexer::{IndexMode, Indexer},
    tensor::{Tensor, TensorError},
    BuilderError, InterpolateError,
};

/// _N_ dimensional multilinear interpolator
///
/// Keeps one [`Indexer`] per axis and one [`LinearCellND`] per grid cell.
/// The cells are stored in an array whose shape is the number of cells
/// along each axis, so the per axis cell indices address a cell directly.
#[derive(Debug, Clone)]
pub struct InterpND<A> {
    indexers: Vec<Indexer<A>>,
    cells: ArrayD<LinearCellND<A>>,
}

impl<A> InterpND<A>
where
    A: Float + Debug + Send + Sync,
{
    /// Get the [InterpNDBuilder]
    pub fn builder<S, D>(data: ArrayBase<S, D>) -> InterpNDBuilder<S, D>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        InterpNDBuilder::new(data)
    }

    /// Create an interpolator from the coordinates of every axis and the
    /// values on the grid, `values[[i, j, ..]] = f(coordinates[0][i], coordinates[1][j], ..)`.
    ///
    /// ```rust
    /// # use ndarray_linterp::*;
    /// # use ndarray::*;
    /// let values = Tensor::from_shape_vec(vec![2, 2, 2], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
    /// let coordinates = vec![array![0.0, 1.0], array![0.0, 1.0], array![0.0, 1.0]];
    /// let interpolator = InterpND::from_tensor(coordinates, &values).unwrap();
    /// assert_eq!(interpolator.eval(&[0.5, 0.5, 0.5]).unwrap(), 3.5);
    /// ```
    ///
    /// # Errors
    ///  - [`BuilderError::DimensionMismatch`] when the number of coordinate
    ///    arrays or their lengths do not match the shape of `values`
    ///  - [`BuilderError::NotEnoughData`] when an axis has less than 2 points
    ///  - [`BuilderError::Monotonic`] when coordinates are not strictly rising
    pub fn from_tensor(
        coordinates: Vec<Array1<A>>,
        values: &Tensor<A>,
    ) -> Result<Self, BuilderError> {
        if coordinates.len() != values.ndim() {
            return Err(BuilderError::DimensionMismatch(format!(
                "got {} coordinate arrays for values of rank {}",
                coordinates.len(),
                values.ndim()
            )));
        }
        let indexers = coordinates
            .into_iter()
            .zip(values.shape())
            .enumerate()
            .map(|(axis, (coords, &len))| {
                Indexer::for_axis(Some(coords), len, &format!("axis {axis}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(indexers, values)
    }

    /// one cell per combination of per axis cell indices
    fn from_parts(indexers: Vec<Indexer<A>>, values: &Tensor<A>) -> Result<Self, BuilderError> {
        let cell_shape: Vec<usize> = indexers.iter().map(Indexer::cells).collect();
        let cells = indices(IxDyn(&cell_shape))
            .into_iter()
            .map(|idx| {
                let index = idx.slice();
                let f = values.subview(index.iter().map(|&i| i..i + 2))?;
                let bounds = indexers
                    .iter()
                    .zip(index)
                    .map(|(indexer, &i)| indexer.bounds(i))
                    .collect();
                LinearCellND::new(bounds, &f)
            })
            .collect::<Result<Vec<_>, TensorError>>()?;
        let cells =
            Array::from_shape_vec(IxDyn(&cell_shape), cells).unwrap_or_else(|_| unreachable!());

        debug!(shape = ?values.shape(), cells = cells.len(), "built ND interpolator");
        Ok(InterpND { indexers, cells })
    }

    /// Interpolated value at `point`, one coordinate per axis.
    ///
    /// # Errors
    /// [`InterpolateError::RankMismatch`] when `point.len() != self.ndim()`
    pub fn eval(&self, point: &[A]) -> Result<A, InterpolateError> {
        self.check_rank(point.len())?;
        Ok(self.eval_unchecked(point))
    }

    /// Interpolated values at every row of `points`, a `(n_points, ndim)` matrix.
    /// The result holds one value per row, in row order.
    ///
    /// ```rust
    /// # use ndarray_linterp::*;
    /// # use ndarray::*;
    /// let interpolator = InterpND::builder(array![[0.0, 1.0], [2.0, 3.0]]).build().unwrap();
    /// let points = array![[0.0, 0.0], [0.5, 0.5], [1.0, 0.25]];
    /// assert_eq!(interpolator.evaln(&points).unwrap(), array![0.0, 1.5, 2.25]);
    /// ```
    ///
    /// # Errors
    /// [`InterpolateError::RankMismatch`] when `points` does not have `self.ndim()` columns
    pub fn evaln<S>(&self, points: &ArrayBase<S, Ix2>) -> Result<Array1<A>, InterpolateError>
    where
        S: Data<Elem = A>,
    {
        self.check_rank(points.ncols())?;
        let zip = Zip::from(points.rows());
        #[cfg(not(feature = "rayon"))]
        let values = zip.map_collect(|row| self.eval_row(row));
        #[cfg(feature = "rayon")]
        let values = zip.par_map_collect(|row| self.eval_row(row));
        Ok(values)
    }

    /// The per axis cell indices used to evaluate `point`
    ///
    /// # Errors
    /// [`InterpolateError::RankMismatch`] when `point.len() != self.ndim()`
    pub fn locate(&self, point: &[A]) -> Result<Vec<usize>, InterpolateError> {
        self.check_rank(point.len())?;
        Ok(self.locate_unchecked(point))
    }

    pub fn indexers(&self) -> &[Indexer<A>] {
        &self.indexers
    }

    pub fn cell(&self, index: &[usize]) -> Option<&LinearCellND<A>> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &ArrayD<LinearCellND<A>> {
        &self.cells
    }

    pub fn ndim(&self) -> usize {
        self.indexers.len()
    }

    /// number of grid points along each axis
    pub fn shape(&self) -> Vec<usize> {
        self.indexers
            .iter()
            .map(|indexer| indexer.coordinates().len())
            .collect()
    }

    fn check_rank(&self, got: usize) -> Result<(), InterpolateError> {
        if got != self.ndim() {
            return Err(InterpolateError::RankMismatch {
                expected: self.ndim(),
                got,
            });
        }
        Ok(())
    }

    fn locate_unchecked(&self, point: &[A]) -> Vec<usize> {
        self.indexers
            .iter()
            .zip(point)
            .map(|(indexer, &p)| indexer.locate(p))
            .collect()
    }

    fn eval_unchecked(&self, point: &[A]) -> A {
        let index = self.locate_unchecked(point);
        self.cells[index.as_slice()].eval(point)
    }

    fn eval_row(&self, row: ArrayView1<'_, A>) -> A {
        match row.as_slice() {
            Some(point) => self.eval_unchecked(point),
            None => self.eval_unchecked(&row.to_vec()),
        }
    }
}

/// Create and configure a [InterpND] Interpolator.
///
/// # Default configuration
/// Every axis of the data uses its index as coordinates, cells are
/// located with [`IndexMode::Search`].
#[derive(Debug)]
pub struct InterpNDBuilder<S, D>
where
    S: Data,
    S::Elem: Debug,
    D: Dimension,
{
    /// `(axis, coordinates)` in the order they were set, later ones win
    axes: Vec<(usize, Array1<S::Elem>)>,
    data: ArrayBase<S, D>,
    mode: IndexMode,
}

impl<S, A, D> InterpNDBuilder<S, D>
where
    S: Data<Elem = A>,
    A: Float + Debug + Send + Sync,
    D: Dimension,
{
    /// Create a new [InterpNDBuilder] and provide the data to interpolate.
    pub fn new(data: ArrayBase<S, D>) -> Self {
        InterpNDBuilder {
            axes: Vec::new(),
            data,
            mode: IndexMode::default(),
        }
    }

    /// Coordinates along `Axis(axis)` of the data, strictly monotonic rising.
    pub fn axis<Sx>(mut self, axis: usize, coords: ArrayBase<Sx, Ix1>) -> Self
    where
        Sx: Data<Elem = A>,
    {
        self.axes.push((axis, coords.to_owned()));
        self
    }

    /// Coordinates for the leading axes of the data, in axis order.
    pub fn axes<I, Sx>(self, coords: I) -> Self
    where
        I: IntoIterator<Item = ArrayBase<Sx, Ix1>>,
        Sx: Data<Elem = A>,
    {
        coords
            .into_iter()
            .enumerate()
            .fold(self, |builder, (axis, coords)| builder.axis(axis, coords))
    }

    /// Set how the enclosing cell of a query is located on every axis.
    /// Only use [`IndexMode::Uniform`] for equidistant coordinates.
    pub fn index_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate input data and create the configured [InterpND]
    pub fn build(self) -> Result<InterpND<A>, BuilderError> {
        let InterpNDBuilder { axes, data, mode } = self;
        let ndim = data.ndim();
        if ndim == 0 {
            return Err(BuilderError::DimensionMismatch(
                "data needs at least one axis".into(),
            ));
        }

        let mut coords: Vec<Option<Array1<A>>> = vec![None; ndim];
        for (axis, axis_coords) in axes {
            let slot = coords.get_mut(axis).ok_or_else(|| {
                BuilderError::DimensionMismatch(format!(
                    "coordinates given for axis {axis}, but data has only {ndim} axes"
                ))
            })?;
            *slot = Some(axis_coords);
        }
        let indexers = coords
            .into_iter()
            .zip(data.shape())
            .enumerate()
            .map(|(axis, (coords, &len))| {
                Indexer::for_axis(coords, len, &format!("axis {axis}"))
                    .map(|indexer| indexer.with_mode(mode))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let values = Tensor::from_array(&data)?;
        InterpND::from_parts(indexers, &values)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array, Array2, ShapeBuilder};

    use super::InterpND;
    use crate::{BuilderError, IndexMode, Interp2D, InterpolateError, Tensor};

    #[test]
    fn cells_mirror_grid() {
        let interp = InterpND::builder(Array::<f64, _>::zeros((3, 2, 4)))
            .build()
            .unwrap();
        assert_eq!(interp.ndim(), 3);
        assert_eq!(interp.shape(), vec![3, 2, 4]);
        assert_eq!(interp.cells().shape(), &[2, 1, 3]);
        assert!(interp.cell(&[1, 0, 2]).is_some());
        assert!(interp.cell(&[1, 1, 2]).is_none());
    }

    #[test]
    fn agrees_with_interp2d() {
        let data = array![[1.0, 2.0, 2.0], [2.0, 3.0, 3.0], [3.0, 3.0, 4.0]];
        let x = array![0.0, 1.0, 3.0];
        let y = array![-1.0, 0.0, 0.5];
        let nd = InterpND::builder(data.view())
            .axes([x.view(), y.view()])
            .build()
            .unwrap();
        let bilinear = Interp2D::builder(data.view()).x(x).y(y).build().unwrap();
        for (px, py) in [(0.0, -1.0), (0.5, 0.25), (2.0, -0.5), (3.0, 0.5), (-1.0, 2.0)] {
            assert_abs_diff_eq!(
                nd.eval(&[px, py]).unwrap(),
                bilinear.eval(px, py),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn locate_per_axis() {
        let interp = InterpND::builder(Array::<f64, _>::zeros((3, 4, 2)))
            .axis(1, array![0.0, 1.0, 5.0, 6.0])
            .build()
            .unwrap();
        assert_eq!(interp.locate(&[0.5, 5.5, 1.0]).unwrap(), vec![0, 2, 0]);
        assert_eq!(interp.locate(&[-1.0, 100.0, f64::NAN]).unwrap(), vec![0, 2, 0]);
    }

    #[test]
    fn rank_mismatch() {
        let interp = InterpND::builder(Array::<f64, _>::zeros((2, 2, 2)))
            .build()
            .unwrap();
        assert_eq!(
            interp.eval(&[0.0, 0.0]),
            Err(InterpolateError::RankMismatch {
                expected: 3,
                got: 2
            })
        );
        assert!(matches!(
            interp.evaln(&Array2::<f64>::zeros((4, 4))),
            Err(InterpolateError::RankMismatch { expected: 3, got: 4 })
        ));
    }

    #[test]
    fn evaln_column_major_points() {
        let interp = InterpND::builder(array![[0.0, 1.0], [2.0, 3.0]])
            .index_mode(IndexMode::Uniform)
            .build()
            .unwrap();
        let mut points = Array2::zeros((3, 2).f());
        points.assign(&array![[0.0, 1.0], [0.5, 0.5], [1.0, 0.0]]);
        assert!(points.row(0).as_slice().is_none());
        let values = interp.evaln(&points).unwrap();
        assert_abs_diff_eq!(values, array![1.0, 1.5, 2.0], epsilon = 1e-12);
    }

    #[test]
    fn from_tensor_checks_coordinates() {
        let values = Tensor::from_shape_vec(vec![2, 3], vec![0.0; 6]).unwrap();
        assert!(matches!(
            InterpND::from_tensor(vec![array![0.0, 1.0]], &values),
            Err(BuilderError::DimensionMismatch(_))
        ));
        assert!(matches!(
            InterpND::from_tensor(vec![array![0.0, 1.0], array![0.0, 1.0]], &values),
            Err(BuilderError::DimensionMismatch(_))
        ));
        assert!(matches!(
            InterpND::from_tensor(vec![array![0.0, 1.0], array![0.0, 2.0, 1.0]], &values),
            Err(BuilderError::Monotonic(_))
        ));
    }

    #[test]
    fn builder_errors() {
        assert!(matches!(
            InterpND::builder(Array::<f64, _>::zeros((2, 2)))
                .axis(2, array![0.0, 1.0])
                .build(),
            Err(BuilderError::DimensionMismatch(_))
        ));
        assert!(matches!(
            InterpND::builder(Array::<f64, _>::zeros((2, 1, 2))).build(),
            Err(BuilderError::NotEnoughData(_))
        ));
        assert!(matches!(
            InterpND::builder(ndarray::arr0(1.0)).build(),
            Err(BuilderError::DimensionMismatch(_))
        ));
    }
}
