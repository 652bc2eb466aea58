use super::view::{MatrixView, MatrixViewMut};

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop: each output element is the dot product
/// of a row of `left` and a column of `right`, summed into one accumulator in
/// increasing `t`. The result overwrites `out` (O = L * R, not O += L * R).
///
/// The summation order is fixed, so any caller that splits the rows of
/// `left`/`out` and runs this on each block gets bit-identical output.
///
/// Shapes are not checked here beyond debug assertions; callers go through
/// [`check_product_shapes`](super::check_product_shapes) first.
///
/// # Arguments
///
/// * `left` - Matrix L (m × k)
/// * `right` - Matrix R (k × n)
/// * `out` - Matrix O (m × n), overwritten
pub fn matmul_naive_ijk(left: MatrixView<'_>, right: MatrixView<'_>, out: &mut MatrixViewMut<'_>) {
    debug_assert_eq!(left.cols(), right.rows());
    debug_assert_eq!(out.rows(), left.rows());
    debug_assert_eq!(out.cols(), right.cols());

    for i in 0..out.rows() {
        let l_row = left.row(i);
        let o_row = out.row_mut(i);
        for (j, o) in o_row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (t, &l) in l_row.iter().enumerate() {
                sum += l * right.get(t, j);
            }
            *o = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_2x3_times_3x2() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = vec![0.0; 4];

        let left = MatrixView::new(&a, 2, 3).unwrap();
        let right = MatrixView::new(&b, 3, 2).unwrap();
        let mut out = MatrixViewMut::new(&mut c, 2, 2).unwrap();
        matmul_naive_ijk(left, right, &mut out);

        assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_naive_overwrites_output() {
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let b = vec![2.0, 3.0, 4.0, 5.0];
        let mut c = vec![100.0; 4];

        let left = MatrixView::new(&a, 2, 2).unwrap();
        let right = MatrixView::new(&b, 2, 2).unwrap();
        let mut out = MatrixViewMut::new(&mut c, 2, 2).unwrap();
        matmul_naive_ijk(left, right, &mut out);

        assert_eq!(c, b);
    }

    #[test]
    fn test_naive_empty_inner_dimension_writes_zeros() {
        let a: Vec<f32> = Vec::new();
        let b: Vec<f32> = Vec::new();
        let mut c = vec![9.0; 6];

        let left = MatrixView::new(&a, 2, 0).unwrap();
        let right = MatrixView::new(&b, 0, 3).unwrap();
        let mut out = MatrixViewMut::new(&mut c, 2, 3).unwrap();
        matmul_naive_ijk(left, right, &mut out);

        assert!(c.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_naive_on_row_block_matches_full() {
        let (m, k, n) = (6, 4, 5);
        let a: Vec<f32> = (0..m * k).map(|i| (i % 7) as f32 * 0.5).collect();
        let b: Vec<f32> = (0..k * n).map(|i| (i % 5) as f32 * 0.25).collect();

        let left = MatrixView::new(&a, m, k).unwrap();
        let right = MatrixView::new(&b, k, n).unwrap();

        let mut full = vec![0.0; m * n];
        matmul_naive_ijk(left, right, &mut MatrixViewMut::new(&mut full, m, n).unwrap());

        let mut block = vec![0.0; 2 * n];
        let left_block = left.row_block(2, 2).unwrap();
        matmul_naive_ijk(left_block, right, &mut MatrixViewMut::new(&mut block, 2, n).unwrap());

        assert_eq!(&full[2 * n..4 * n], &block[..]);
    }
}
