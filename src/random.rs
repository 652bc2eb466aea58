//! Random matrix population for benchmark inputs.

use crate::error::Result;
use crate::matrix::view::MatrixViewMut;
use rand::Rng;

/// Fill a `rows × cols` row-major buffer with independent uniform values
/// in `[0, 1)`.
pub fn random_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    data: &mut [f32],
    rows: usize,
    cols: usize,
) -> Result<()> {
    let mut view = MatrixViewMut::new(data, rows, cols)?;
    for i in 0..rows {
        for x in view.row_mut(i) {
            *x = rng.r#gen::<f32>();
        }
    }
    Ok(())
}
