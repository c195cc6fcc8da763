//! Dense _n_-dimensional storage the interpolation cells are built from.
//!
//! A [`Tensor`] owns a contiguous row-major buffer. [`TensorView`] and
//! [`TensorViewMut`] borrow such a buffer through a strided [`Layout`],
//! so a rectangular block of a tensor can be handed out with
//! [`Tensor::subview`] without copying any data.
//!
//! ```rust
//! # use ndarray_linterp::Tensor;
//! let tensor = Tensor::from_shape_vec(vec![2, 2, 3], (1..=12).map(f64::from).collect()).unwrap();
//! let block = tensor.subview([1..2, 0..2, 1..3]).unwrap();
//! assert_eq!(block.shape(), &[1, 2, 2]);
//! assert_eq!(block.read(&[0, 1, 1]).unwrap(), 12.0);
//! ```
use std::ops::{Range, RangeInclusive};

use ndarray::{Array, ArrayBase, ArrayD, ArrayViewD, ArrayViewMutD, Data, Dimension, IxDyn};
use num_traits::Zero;
use thiserror::Error;

mod view;

pub use view::{TensorView, TensorViewMut};

/// Errors of tensor construction and element access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TensorError {
    /// The buffer length is not the product of the extents.
    #[error("buffer of length {len} does not fit shape {shape:?}")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
    /// The shape has no axes, a zero extent, or is not the shape required by the caller.
    #[error("invalid shape {0:?}")]
    InvalidShape(Vec<usize>),
    /// The number of indices or ranges differs from the number of axes.
    #[error("expected {expected} indices, got {got}")]
    RankMismatch { expected: usize, got: usize },
    /// An index or range reaches past the extent of an axis.
    #[error("index {index} is out of range for axis {axis} with extent {extent}")]
    OutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },
    /// A range selects no element.
    #[error("empty range {start}..{end} on axis {axis}")]
    InvalidRange {
        axis: usize,
        start: usize,
        end: usize,
    },
}

/// A range of indices along one axis, stored half-open.
///
/// Created from `a..b`, from the closed `a..=b` or from a single index.
/// A closed range ending at `usize::MAX` saturates to the end `usize::MAX`;
/// no tensor has an axis that long, so slicing with it is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub start: usize,
    pub end: usize,
}

impl AxisRange {
    /// number of selected indices, `0` for empty or reversed ranges
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Range<usize>> for AxisRange {
    fn from(range: Range<usize>) -> Self {
        AxisRange {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<RangeInclusive<usize>> for AxisRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, last) = range.into_inner();
        AxisRange {
            start,
            end: last.saturating_add(1),
        }
    }
}

impl From<usize> for AxisRange {
    fn from(index: usize) -> Self {
        AxisRange {
            start: index,
            end: index.saturating_add(1),
        }
    }
}

/// Shape, strides and offset mapping multi-indices into a flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl Layout {
    /// contiguous row-major layout, the last axis varies fastest
    pub(crate) fn row_major(shape: &[usize]) -> Result<Self, TensorError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(TensorError::InvalidShape(shape.to_vec()));
        }
        // the element count must fit a usize, every stride is below it
        let mut strides = vec![1; shape.len()];
        let mut len = 1usize;
        for axis in (0..shape.len()).rev() {
            strides[axis] = len;
            len = len
                .checked_mul(shape[axis])
                .ok_or_else(|| TensorError::InvalidShape(shape.to_vec()))?;
        }
        Ok(Layout {
            shape: shape.to_vec(),
            strides,
            offset: 0,
        })
    }

    pub(crate) fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub(crate) fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.shape.iter().product()
    }

    fn check_rank(&self, got: usize) -> Result<(), TensorError> {
        if got != self.ndim() {
            return Err(TensorError::RankMismatch {
                expected: self.ndim(),
                got,
            });
        }
        Ok(())
    }

    /// position of `index` in the underlying buffer
    pub(crate) fn offset_of(&self, index: &[usize]) -> Result<usize, TensorError> {
        self.check_rank(index.len())?;
        index
            .iter()
            .zip(self.shape.iter().zip(&self.strides))
            .enumerate()
            .try_fold(self.offset, |acc, (axis, (&index, (&extent, &stride)))| {
                if index >= extent {
                    return Err(TensorError::OutOfRange {
                        axis,
                        index,
                        extent,
                    });
                }
                Ok(acc + index * stride)
            })
    }

    /// layout of the block selected by `ranges`, sharing the buffer
    pub(crate) fn slice(&self, ranges: &[AxisRange]) -> Result<Layout, TensorError> {
        self.check_rank(ranges.len())?;
        let mut offset = self.offset;
        let mut shape = Vec::with_capacity(ranges.len());
        for (axis, (range, (&extent, &stride))) in ranges
            .iter()
            .zip(self.shape.iter().zip(&self.strides))
            .enumerate()
        {
            if range.start >= extent || range.end > extent {
                return Err(TensorError::OutOfRange {
                    axis,
                    index: range.start.max(extent),
                    extent,
                });
            }
            if range.is_empty() {
                return Err(TensorError::InvalidRange {
                    axis,
                    start: range.start,
                    end: range.end,
                });
            }
            offset += range.start * stride;
            shape.push(range.len());
        }
        Ok(Layout {
            shape,
            strides: self.strides.clone(),
            offset,
        })
    }
}

fn collect_ranges<I>(ranges: I) -> Vec<AxisRange>
where
    I: IntoIterator,
    I::Item: Into<AxisRange>,
{
    ranges.into_iter().map(Into::into).collect()
}

/// Owned, contiguous, row-major _n_-dimensional array.
///
/// Invariant: the buffer length always equals the product of the extents,
/// and every extent is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<A> {
    data: Vec<A>,
    layout: Layout,
}

impl<A> Tensor<A> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///  - [`TensorError::InvalidShape`] for an empty shape or a zero extent
    ///  - [`TensorError::ShapeMismatch`] when `data.len()` is not the product of `shape`
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<A>) -> Result<Self, TensorError> {
        let layout = Layout::row_major(&shape)?;
        if layout.len() != data.len() {
            return Err(TensorError::ShapeMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Tensor { data, layout })
    }

    /// Copy an ndarray array of any dimension and memory order into a row-major tensor.
    pub fn from_array<S, D>(array: &ArrayBase<S, D>) -> Result<Self, TensorError>
    where
        S: Data<Elem = A>,
        A: Clone,
        D: Dimension,
    {
        Self::from_shape_vec(array.shape().to_vec(), array.iter().cloned().collect())
    }

    /// A tensor of the given shape filled with zeros
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError>
    where
        A: Zero + Clone,
    {
        let layout = Layout::row_major(&shape)?;
        Ok(Tensor {
            data: vec![A::zero(); layout.len()],
            layout,
        })
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// element strides of each axis in the buffer
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// the row-major buffer
    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    /// Reference to the element at `index`, `None` when the index
    /// has the wrong rank or is out of range.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        let offset = self.layout.offset_of(index).ok()?;
        self.data.get(offset)
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        let offset = self.layout.offset_of(index).ok()?;
        self.data.get_mut(offset)
    }

    /// Read the element at `index`.
    ///
    /// # Errors
    ///  - [`TensorError::RankMismatch`] when `index.len() != self.ndim()`
    ///  - [`TensorError::OutOfRange`] when an index reaches past its axis
    pub fn read(&self, index: &[usize]) -> Result<A, TensorError>
    where
        A: Clone,
    {
        let offset = self.layout.offset_of(index)?;
        Ok(self.data[offset].clone())
    }

    /// Overwrite the element at `index`, fails like [`read`](Tensor::read).
    pub fn write(&mut self, index: &[usize], value: A) -> Result<(), TensorError> {
        let offset = self.layout.offset_of(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// View of the whole tensor
    pub fn view(&self) -> TensorView<'_, A> {
        TensorView::new(&self.data, self.layout.clone())
    }

    pub fn view_mut(&mut self) -> TensorViewMut<'_, A> {
        TensorViewMut::new(&mut self.data, self.layout.clone())
    }

    /// View of the rectangular block selected by one range per axis.
    /// The view shares this tensor's buffer and its extents are the
    /// lengths of the ranges.
    ///
    /// ```rust
    /// # use ndarray_linterp::Tensor;
    /// let tensor = Tensor::from_shape_vec(vec![3, 3], (0..9).collect()).unwrap();
    /// let block = tensor.subview([1..=2, 0..=1]).unwrap();
    /// assert_eq!(block.iter().copied().collect::<Vec<_>>(), vec![3, 4, 6, 7]);
    /// ```
    ///
    /// # Errors
    ///  - [`TensorError::RankMismatch`] when the number of ranges is not `self.ndim()`
    ///  - [`TensorError::InvalidRange`] for an empty range
    ///  - [`TensorError::OutOfRange`] for a range reaching past its axis
    pub fn subview<I>(&self, ranges: I) -> Result<TensorView<'_, A>, TensorError>
    where
        I: IntoIterator,
        I::Item: Into<AxisRange>,
    {
        let layout = self.layout.slice(&collect_ranges(ranges))?;
        Ok(TensorView::new(&self.data, layout))
    }

    /// Mutable view of a rectangular block, see [`subview`](Tensor::subview)
    pub fn subview_mut<I>(&mut self, ranges: I) -> Result<TensorViewMut<'_, A>, TensorError>
    where
        I: IntoIterator,
        I::Item: Into<AxisRange>,
    {
        let layout = self.layout.slice(&collect_ranges(ranges))?;
        Ok(TensorViewMut::new(&mut self.data, layout))
    }

    /// elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.data.iter()
    }

    pub fn as_array_view(&self) -> ArrayViewD<'_, A> {
        self.view().as_array_view()
    }

    pub fn as_array_view_mut(&mut self) -> ArrayViewMutD<'_, A> {
        self.view_mut().into_array_view_mut()
    }

    /// Convert into an owned ndarray array without copying.
    pub fn into_array(self) -> ArrayD<A> {
        Array::from_shape_vec(IxDyn(self.layout.shape()), self.data)
            .unwrap_or_else(|_| unreachable!("buffer length matches the shape"))
    }
}
