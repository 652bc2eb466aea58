//! Trial loop: allocate, fill, multiply, record.

use crate::config::{BenchConfig, Variant};
use crate::error::{MatmulError, Result};
use crate::random::random_matrix;
use crate::timing::{TrialReport, time_trial};
use crate::{multiply, multiply_parallel};
use rand::Rng;
use std::time::Duration;

/// Allocate a zeroed `rows × cols` buffer, reporting failure instead of
/// aborting.
pub fn alloc_matrix(what: &'static str, rows: usize, cols: usize) -> Result<Vec<f32>> {
    let elements = rows
        .checked_mul(cols)
        .ok_or(MatmulError::AllocationFailure {
            what,
            elements: usize::MAX,
        })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(elements)
        .map_err(|_| MatmulError::AllocationFailure { what, elements })?;
    buf.resize(elements, 0.0);
    Ok(buf)
}

/// Run one product with the given variant.
pub fn run_variant(
    variant: Variant,
    config: &BenchConfig,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
) -> Result<()> {
    let (m, k, n) = (config.m, config.k, config.n);
    match variant {
        Variant::Naive => multiply(a, b, c, m, k, n),
        Variant::Threaded => multiply_parallel(a, b, c, m, k, n, config.threads),
    }
}

/// Run `config.trials` trials of `variant`.
///
/// Each trial refills both inputs from `rng`, then times one product.
/// `on_trial` sees the 0-based trial index and its duration as soon as the
/// trial finishes. Any error aborts the run.
pub fn run_benchmark<R, F>(
    config: &BenchConfig,
    variant: Variant,
    rng: &mut R,
    mut on_trial: F,
) -> Result<TrialReport>
where
    R: Rng + ?Sized,
    F: FnMut(usize, Duration),
{
    config.validate()?;
    let (m, k, n) = (config.m, config.k, config.n);

    let mut a = alloc_matrix("A", m, k)?;
    let mut b = alloc_matrix("B", k, n)?;
    let mut c = alloc_matrix("C", m, n)?;

    let mut report = TrialReport::with_capacity(config.trials);
    for trial in 0..config.trials {
        random_matrix(rng, &mut a, m, k)?;
        random_matrix(rng, &mut b, k, n)?;

        let elapsed = time_trial(|| run_variant(variant, config, &a, &b, &mut c))?;
        on_trial(trial, elapsed);
        report.record(elapsed);
    }

    Ok(report)
}
