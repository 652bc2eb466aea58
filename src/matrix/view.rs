//! Non-owning row-major windows over caller-owned buffers.
//!
//! A view is `(data, offset, rows, cols, stride)`: element `(i, j)` lives at
//! `data[offset + i * stride + j]`. The layout is checked once when the view
//! is built, so every in-range `(i, j)` access stays inside `data`.
//!
//! [`MatrixView`] is `Copy` and may alias freely. [`MatrixViewMut`] can only
//! be narrowed by [`MatrixViewMut::split_rows`], which hands out disjoint
//! row blocks backed by disjoint sub-slices.

use crate::error::{MatmulError, Result};

fn check_layout(len: usize, offset: usize, rows: usize, cols: usize, stride: usize) -> Result<()> {
    let err = || MatmulError::InvalidView {
        len,
        offset,
        rows,
        cols,
        stride,
    };

    if cols > stride {
        return Err(err());
    }
    if rows == 0 {
        return if offset <= len { Ok(()) } else { Err(err()) };
    }

    let end = (rows - 1)
        .checked_mul(stride)
        .and_then(|x| x.checked_add(offset))
        .and_then(|x| x.checked_add(cols))
        .ok_or_else(err)?;

    if end > len { Err(err()) } else { Ok(()) }
}

/// Read-only view of a row-major `f32` matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    offset: usize,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixView<'a> {
    /// View a dense `rows × cols` buffer. The buffer must be at least
    /// `rows * cols` long.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> Result<Self> {
        Self::with_layout(data, 0, rows, cols, cols)
    }

    /// View `rows × cols` elements starting at `offset`, with consecutive
    /// rows `stride` elements apart.
    pub fn with_layout(
        data: &'a [f32],
        offset: usize,
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self> {
        check_layout(data.len(), offset, rows, cols, stride)?;
        Ok(Self {
            data,
            offset,
            rows,
            cols,
            stride,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.offset + i * self.stride + j]
    }

    /// Row `i` as a contiguous slice of `cols` elements.
    #[inline]
    pub fn row(&self, i: usize) -> &'a [f32] {
        debug_assert!(i < self.rows);
        let data = self.data;
        let start = self.offset + i * self.stride;
        &data[start..start + self.cols]
    }

    /// Rows `[start, start + len)` of this view, sharing the same buffer.
    pub fn row_block(&self, start: usize, len: usize) -> Result<MatrixView<'a>> {
        if start.checked_add(len).is_none_or(|end| end > self.rows) {
            return Err(MatmulError::InvalidView {
                len: self.data.len(),
                offset: self.offset.saturating_add(start.saturating_mul(self.stride)),
                rows: len,
                cols: self.cols,
                stride: self.stride,
            });
        }
        Ok(MatrixView {
            data: self.data,
            offset: self.offset + start * self.stride,
            rows: len,
            cols: self.cols,
            stride: self.stride,
        })
    }

    /// Copy the viewed elements out into a dense row-major vector.
    pub fn to_vec(&self) -> Vec<f32> {
        (0..self.rows).flat_map(|i| self.row(i).iter().copied()).collect()
    }
}

/// Mutable view of a row-major `f32` matrix.
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f32],
    offset: usize,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixViewMut<'a> {
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self> {
        Self::with_layout(data, 0, rows, cols, cols)
    }

    pub fn with_layout(
        data: &'a mut [f32],
        offset: usize,
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self> {
        check_layout(data.len(), offset, rows, cols, stride)?;
        Ok(Self {
            data,
            offset,
            rows,
            cols,
            stride,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.offset + i * self.stride + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[self.offset + i * self.stride + j] = value;
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        debug_assert!(i < self.rows);
        let start = self.offset + i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// Split into `parts` row blocks of `rows / parts` rows each, in order.
    ///
    /// Each block borrows its own sub-slice of the buffer, so the blocks can
    /// be written from different threads. Fails with `UnevenPartition` when
    /// `parts` is zero or does not divide `rows`.
    pub fn split_rows(self, parts: usize) -> Result<Vec<MatrixViewMut<'a>>> {
        if parts == 0 || self.rows % parts != 0 {
            return Err(MatmulError::UnevenPartition {
                rows: self.rows,
                threads: parts,
            });
        }

        let block_rows = self.rows / parts;
        let MatrixViewMut {
            data,
            offset,
            cols,
            stride,
            ..
        } = self;

        let mut rest = &mut data[offset..];
        let mut blocks = Vec::with_capacity(parts);
        for index in 0..parts {
            // The last block keeps the tail so a final short row still fits.
            let span = if index + 1 == parts {
                rest.len()
            } else {
                block_rows * stride
            };
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(span);
            blocks.push(MatrixViewMut {
                data: head,
                offset: 0,
                rows: block_rows,
                cols,
                stride,
            });
            rest = tail;
        }

        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_rejects_short_buffer() {
        let data = vec![0.0f32; 5];
        let err = MatrixView::new(&data, 2, 3).unwrap_err();
        assert!(matches!(err, MatmulError::InvalidView { len: 5, .. }));
    }

    #[test]
    fn test_view_rejects_cols_wider_than_stride() {
        let data = vec![0.0f32; 16];
        assert!(MatrixView::with_layout(&data, 0, 2, 5, 4).is_err());
    }

    #[test]
    fn test_strided_view_reads_inner_window() {
        // 3x4 buffer, view the 2x2 window starting at (1, 1)
        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let view = MatrixView::with_layout(&data, 5, 2, 2, 4).unwrap();

        assert_eq!(view.get(0, 0), 5.0);
        assert_eq!(view.get(1, 1), 10.0);
        assert_eq!(view.row(1), &[9.0, 10.0]);
        assert_eq!(view.to_vec(), vec![5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn test_row_block_bounds() {
        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let view = MatrixView::new(&data, 4, 3).unwrap();

        let block = view.row_block(2, 2).unwrap();
        assert_eq!(block.rows(), 2);
        assert_eq!(block.offset(), 6);
        assert_eq!(block.get(0, 0), 6.0);

        assert!(view.row_block(3, 2).is_err());
        assert!(view.row_block(usize::MAX, 2).is_err());
        assert_eq!(view.row_block(4, 0).unwrap().rows(), 0);
    }

    #[test]
    fn test_split_rows_is_disjoint_and_ordered() {
        let mut data = vec![0.0f32; 8 * 3];
        let view = MatrixViewMut::new(&mut data, 8, 3).unwrap();
        let mut blocks = view.split_rows(4).unwrap();
        assert_eq!(blocks.len(), 4);

        for (b, block) in blocks.iter_mut().enumerate() {
            assert_eq!(block.rows(), 2);
            for i in 0..block.rows() {
                for j in 0..block.cols() {
                    block.set(i, j, b as f32);
                }
            }
            assert_eq!(block.get(1, 2), b as f32);
        }
        drop(blocks);

        for (row, chunk) in data.chunks(3).enumerate() {
            assert!(chunk.iter().all(|&x| x == (row / 2) as f32));
        }
    }

    #[test]
    fn test_split_rows_with_stride() {
        // 4x2 window inside a 4x3 buffer: the last row ends before the padding
        let mut data = vec![-1.0f32; 4 * 3 - 1];
        let view = MatrixViewMut::with_layout(&mut data, 0, 4, 2, 3).unwrap();
        let mut blocks = view.split_rows(2).unwrap();

        for block in blocks.iter_mut() {
            for i in 0..block.rows() {
                block.row_mut(i).fill(7.0);
            }
        }
        drop(blocks);

        assert_eq!(
            data,
            vec![7.0, 7.0, -1.0, 7.0, 7.0, -1.0, 7.0, 7.0, -1.0, 7.0, 7.0]
        );
    }

    #[test]
    fn test_split_rows_rejects_uneven() {
        let mut data = vec![0.0f32; 6];
        let view = MatrixViewMut::new(&mut data, 3, 2).unwrap();
        assert_eq!(
            view.split_rows(2).unwrap_err(),
            MatmulError::UnevenPartition {
                rows: 3,
                threads: 2
            }
        );

        let view = MatrixViewMut::new(&mut data, 3, 2).unwrap();
        assert!(view.split_rows(0).is_err());
    }
}
