//! Naive vs row-block multi-threaded matrix multiplication.
//!
//! The baseline is the textbook i-j-k triple loop. The parallel version
//! splits the rows of the left matrix (and of the output) into one
//! contiguous block per thread, shares the whole right matrix read-only,
//! and runs the same triple loop on every block. Because each output
//! element is still summed by one thread in the same order, the parallel
//! result is bit-identical to the baseline.
//!
//! ## Usage
//!
//! ```
//! use matmul_rowblock::multiply;
//!
//! let a = vec![1.0f32; 64 * 32];
//! let b = vec![1.0f32; 32 * 48];
//! let mut c = vec![0.0f32; 64 * 48];
//!
//! multiply(&a, &b, &mut c, 64, 32, 48).unwrap();
//! assert!(c.iter().all(|&x| x == 32.0));
//! ```
//!
//! The multi-threaded version takes the thread count, which has to divide
//! the number of rows:
//!
//! ```
//! use matmul_rowblock::{multiply_parallel, MatmulError};
//!
//! let a = vec![1.0f32; 64 * 32];
//! let b = vec![1.0f32; 32 * 48];
//! let mut c = vec![0.0f32; 64 * 48];
//!
//! multiply_parallel(&a, &b, &mut c, 64, 32, 48, 8).unwrap();
//!
//! let err = multiply_parallel(&a, &b, &mut c, 64, 32, 48, 6).unwrap_err();
//! assert!(matches!(err, MatmulError::UnevenPartition { rows: 64, threads: 6 }));
//! ```
//!
//! ## What's inside
//!
//! - `matrix`: bounds-checked row-major views and the naive kernel
//! - `threaded`: row partitioning and the scoped-thread dispatcher
//! - `random`, `timing`, `runner`, `config`: the trial benchmark around them

pub mod config;
pub mod error;
pub mod matrix;
pub mod random;
pub mod runner;
pub mod threaded;
pub mod timing;

pub use config::{BenchConfig, Variant};
pub use error::{MatmulError, Result};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::view::{MatrixView, MatrixViewMut};
pub use threaded::matmul_row_blocks_mt;

fn check_len(what: &'static str, got: usize, rows: usize, cols: usize) -> Result<()> {
    let expected = rows.saturating_mul(cols);
    if rows.checked_mul(cols) != Some(got) {
        return Err(MatmulError::LengthMismatch {
            what,
            rows,
            cols,
            expected,
            got,
        });
    }
    Ok(())
}

fn views<'a, 'b, 'c>(
    a: &'a [f32],
    b: &'b [f32],
    c: &'c mut [f32],
    m: usize,
    k: usize,
    n: usize,
) -> Result<(MatrixView<'a>, MatrixView<'b>, MatrixViewMut<'c>)> {
    check_len("A", a.len(), m, k)?;
    check_len("B", b.len(), k, n)?;
    check_len("C", c.len(), m, n)?;
    Ok((
        MatrixView::new(a, m, k)?,
        MatrixView::new(b, k, n)?,
        MatrixViewMut::new(c, m, n)?,
    ))
}

/// Matrix multiply: C = A * B, single-threaded.
///
/// Matrices are row-major: A is m×k, B is k×n, C is m×n. C is overwritten.
///
/// # Errors
///
/// `LengthMismatch` if a slice length doesn't match its dimensions.
pub fn multiply(a: &[f32], b: &[f32], c: &mut [f32], m: usize, k: usize, n: usize) -> Result<()> {
    // views built from one (m, k, n) always have matching shapes
    let (left, right, mut out) = views(a, b, c, m, k, n)?;
    matmul_naive_ijk(left, right, &mut out);
    Ok(())
}

/// Same as [`multiply`] but spread over `num_threads` threads, one
/// contiguous block of `m / num_threads` rows each.
///
/// The output is bit-identical to [`multiply`].
///
/// # Errors
///
/// - `LengthMismatch` if a slice length doesn't match its dimensions
/// - `UnevenPartition` if `num_threads` is zero or doesn't divide `m`;
///   `c` is left untouched
/// - `WorkerFailure` if a thread panicked or couldn't be spawned
pub fn multiply_parallel(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    m: usize,
    k: usize,
    n: usize,
    num_threads: usize,
) -> Result<()> {
    let (left, right, out) = views(a, b, c, m, k, n)?;
    matmul_row_blocks_mt(left, right, out, num_threads)
}
