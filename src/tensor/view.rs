use ndarray::{ArrayView, ArrayViewD, ArrayViewMut, ArrayViewMutD, IxDyn, ShapeBuilder};

use super::{collect_ranges, AxisRange, Layout, Tensor, TensorError};

/// Borrowed, possibly strided, view into the buffer of a [`Tensor`].
///
/// The view can not outlive the tensor it was created from.
#[derive(Debug, Clone)]
pub struct TensorView<'a, A> {
    data: &'a [A],
    layout: Layout,
}

impl<'a, A> TensorView<'a, A> {
    pub(crate) fn new(data: &'a [A], layout: Layout) -> Self {
        TensorView { data, layout }
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// element strides of each axis in the shared buffer
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// position of the first element of the view in the shared buffer
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn get(&self, index: &[usize]) -> Option<&'a A> {
        let offset = self.layout.offset_of(index).ok()?;
        self.data.get(offset)
    }

    /// Read the element at `index`, relative to the origin of the view.
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

    /// Sub view of this view, the ranges are relative to the origin of the view.
    /// The result borrows the same buffer as `self`.
    pub fn subview<I>(&self, ranges: I) -> Result<TensorView<'a, A>, TensorError>
    where
        I: IntoIterator,
        I::Item: Into<AxisRange>,
    {
        let layout = self.layout.slice(&collect_ranges(ranges))?;
        Ok(TensorView::new(self.data, layout))
    }

    /// the same elements as an ndarray view, without copying
    pub fn as_array_view(&self) -> ArrayViewD<'a, A> {
        let shape = IxDyn(self.layout.shape()).strides(IxDyn(self.layout.strides()));
        ArrayView::from_shape(shape, &self.data[self.layout.offset()..])
            .unwrap_or_else(|_| unreachable!("the layout stays inside the buffer"))
    }

    /// elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &'a A> {
        self.as_array_view().into_iter()
    }

    /// Copy the viewed elements into a new contiguous tensor.
    pub fn to_tensor(&self) -> Tensor<A>
    where
        A: Clone,
    {
        let layout = Layout::row_major(self.layout.shape())
            .unwrap_or_else(|_| unreachable!("views never have empty extents"));
        let data = self.iter().cloned().collect();
        Tensor { data, layout }
    }
}

/// Mutable counterpart of [`TensorView`].
#[derive(Debug)]
pub struct TensorViewMut<'a, A> {
    data: &'a mut [A],
    layout: Layout,
}

impl<'a, A> TensorViewMut<'a, A> {
    pub(crate) fn new(data: &'a mut [A], layout: Layout) -> Self {
        TensorViewMut { data, layout }
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// read only view of the same elements
    pub fn view(&self) -> TensorView<'_, A> {
        TensorView::new(&*self.data, self.layout.clone())
    }

    pub fn read(&self, index: &[usize]) -> Result<A, TensorError>
    where
        A: Clone,
    {
        let offset = self.layout.offset_of(index)?;
        Ok(self.data[offset].clone())
    }

    /// Overwrite the element at `index`, relative to the origin of the view.
    pub fn write(&mut self, index: &[usize], value: A) -> Result<(), TensorError> {
        let offset = self.layout.offset_of(index)?;
        self.data[offset] = value;
        Ok(())
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        let offset = self.layout.offset_of(index).ok()?;
        self.data.get_mut(offset)
    }

    /// Mutable sub view, reborrowing `self` for its lifetime.
    pub fn subview_mut<I>(&mut self, ranges: I) -> Result<TensorViewMut<'_, A>, TensorError>
    where
        I: IntoIterator,
        I::Item: Into<AxisRange>,
    {
        let layout = self.layout.slice(&collect_ranges(ranges))?;
        Ok(TensorViewMut::new(&mut *self.data, layout))
    }

    /// Set every element of the view to `value`
    pub fn fill(&mut self, value: A)
    where
        A: Clone,
    {
        self.as_array_view_mut().fill(value);
    }

    pub fn as_array_view_mut(&mut self) -> ArrayViewMutD<'_, A> {
        let shape = IxDyn(self.layout.shape()).strides(IxDyn(self.layout.strides()));
        ArrayViewMut::from_shape(shape, &mut self.data[self.layout.offset()..])
            .unwrap_or_else(|_| unreachable!("the layout stays inside the buffer"))
    }

    pub fn into_array_view_mut(self) -> ArrayViewMutD<'a, A> {
        let TensorViewMut { data, layout } = self;
        let shape = IxDyn(layout.shape()).strides(IxDyn(layout.strides()));
        ArrayViewMut::from_shape(shape, &mut data[layout.offset()..])
            .unwrap_or_else(|_| unreachable!("the layout stays inside the buffer"))
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::{Tensor, TensorError};

    fn tensor_3x3() -> Tensor<f64> {
        Tensor::from_shape_vec(vec![3, 3], vec![1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 4.0])
            .unwrap()
    }

    #[test]
    fn subview_of_subview() {
        let tensor = tensor_3x3();
        let outer = tensor.subview([1..3, 0..3]).unwrap();
        let inner = outer.subview([1..2, 1..3]).unwrap();
        assert_eq!(inner.shape(), &[1, 2]);
        assert_eq!(inner.offset(), 7);
        assert_eq!(inner.read(&[0, 0]), Ok(3.0));
        assert_eq!(inner.read(&[0, 1]), Ok(4.0));
        assert_eq!(
            outer.subview([2..3, 0..1]).unwrap_err(),
            TensorError::OutOfRange {
                axis: 0,
                index: 2,
                extent: 2
            }
        );
    }

    #[test]
    fn view_iter_row_major() {
        let tensor = tensor_3x3();
        let view = tensor.subview([0..=1, 1..=2]).unwrap();
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![2.0, 2.0, 3.0, 3.0]);
        assert_eq!(view.to_tensor().as_slice(), &[2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn as_array_view_matches() {
        let tensor = tensor_3x3();
        let view = tensor.subview([1..3, 1..3]).unwrap();
        let array = view.as_array_view();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array[[0, 0]], 3.0);
        assert_eq!(array[[1, 1]], 4.0);
    }

    #[test]
    fn write_through_subview() {
        let mut tensor = tensor_3x3();
        {
            let mut view = tensor.subview_mut([1..3, 1..3]).unwrap();
            view.write(&[1, 0], -3.0).unwrap();
            let mut corner = view.subview_mut([1..2, 1..2]).unwrap();
            corner.fill(0.0);
            assert_eq!(
                view.write(&[2, 0], 1.0),
                Err(TensorError::OutOfRange {
                    axis: 0,
                    index: 2,
                    extent: 2
                })
            );
        }
        assert_eq!(tensor.read(&[2, 1]), Ok(-3.0));
        assert_eq!(tensor.read(&[2, 2]), Ok(0.0));
        assert_eq!(tensor.read(&[1, 1]), Ok(3.0));
    }
}
