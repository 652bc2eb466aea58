//! Matrix views and the sequential kernel.
//!
//! The naive kernel is the correctness baseline and also the unit of work
//! each thread runs in the row-block parallel version.

pub mod naive_ijk;
pub mod view;

use crate::error::{MatmulError, Result};
use view::{MatrixView, MatrixViewMut};

/// Check that `left` (m × k) times `right` (k × n) fits into `out` (m × n).
pub fn check_product_shapes(
    left: &MatrixView<'_>,
    right: &MatrixView<'_>,
    out: &MatrixViewMut<'_>,
) -> Result<()> {
    if left.cols() != right.rows() || out.rows() != left.rows() || out.cols() != right.cols() {
        return Err(MatmulError::InvalidDimensions {
            m: left.rows(),
            k: left.cols(),
            k2: right.rows(),
            n: right.cols(),
            out_rows: out.rows(),
            out_cols: out.cols(),
        });
    }
    Ok(())
}
