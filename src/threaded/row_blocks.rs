//! Multi-threaded naive GEMM over contiguous row blocks.

use crate::error::{MatmulError, Result};
use crate::matrix::check_product_shapes;
use crate::matrix::naive_ijk::matmul_naive_ijk;
use crate::matrix::view::{MatrixView, MatrixViewMut};
use std::any::Any;
use std::thread;

/// Rows `[start, start + len)` of the left operand and the output, handled
/// by worker `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub index: usize,
    pub start: usize,
    pub len: usize,
}

impl RowBlock {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split `rows` into `threads` equal, contiguous, ordered blocks.
///
/// Fails with `UnevenPartition` if `threads` is zero or does not divide
/// `rows`. Remainder rows are never dropped or folded into a larger block.
pub fn partition_rows(rows: usize, threads: usize) -> Result<Vec<RowBlock>> {
    if threads == 0 || rows % threads != 0 {
        return Err(MatmulError::UnevenPartition { rows, threads });
    }

    let block_size = rows / threads;
    Ok((0..threads)
        .map(|index| RowBlock {
            index,
            start: index * block_size,
            len: block_size,
        })
        .collect())
}

/// Everything one worker needs: its slice of L, all of R, its slice of O.
#[derive(Debug)]
pub struct WorkItem<'l, 'r, 'o> {
    pub block: RowBlock,
    pub left: MatrixView<'l>,
    pub right: MatrixView<'r>,
    pub out: MatrixViewMut<'o>,
}

impl WorkItem<'_, '_, '_> {
    pub fn run(mut self) {
        matmul_naive_ijk(self.left, self.right, &mut self.out);
    }
}

/// Build one work item per row block. Nothing is written to `out`.
pub fn plan_work<'l, 'r, 'o>(
    left: MatrixView<'l>,
    right: MatrixView<'r>,
    out: MatrixViewMut<'o>,
    threads: usize,
) -> Result<Vec<WorkItem<'l, 'r, 'o>>> {
    check_product_shapes(&left, &right, &out)?;
    let blocks = partition_rows(left.rows(), threads)?;
    let out_blocks = out.split_rows(threads)?;

    blocks
        .into_iter()
        .zip(out_blocks)
        .map(|(block, out)| {
            Ok(WorkItem {
                block,
                left: left.row_block(block.start, block.len)?,
                right,
                out,
            })
        })
        .collect()
}

/// Row-block parallel matrix multiplication: O = L * R.
///
/// Splits the rows of `left` and `out` into `threads` equal blocks and runs
/// the naive kernel on each block in its own scoped thread. All threads share
/// the same read-only view of `right`; each owns a disjoint block of `out`,
/// so no locking is involved. The call returns after every worker has been
/// joined, and the result is bit-identical to
/// [`matmul_naive_ijk`] on the whole matrices.
///
/// Shape and partition errors are reported before any thread is spawned or
/// any element of `out` is written. A panicking worker, or one that could not
/// be spawned, fails the whole call with `WorkerFailure`; the remaining
/// workers are still joined before returning.
///
/// # Arguments
///
/// * `threads` - Number of workers; must divide `left.rows()`
pub fn matmul_row_blocks_mt(
    left: MatrixView<'_>,
    right: MatrixView<'_>,
    out: MatrixViewMut<'_>,
    threads: usize,
) -> Result<()> {
    let work = plan_work(left, right, out, threads)?;

    if left.rows() == 0 {
        return Ok(());
    }

    let jobs = work
        .into_iter()
        .map(|item| (item.block.index, move || item.run()))
        .collect();
    join_workers(jobs)
}

/// Spawn one named scoped thread per job and join them all.
///
/// Every spawned thread is joined before this returns, whatever happens to
/// the others. The first failing block (in block order) is reported.
fn join_workers<F>(jobs: Vec<(usize, F)>) -> Result<()>
where
    F: FnOnce() + Send,
{
    thread::scope(|s| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|(block, job)| {
                let handle = thread::Builder::new()
                    .name(format!("matmul-block-{}", block))
                    .spawn_scoped(s, job);
                (block, handle)
            })
            .collect();

        let mut first_failure = None;
        for (block, handle) in handles {
            let outcome = match handle {
                Ok(handle) => handle.join().map_err(|payload| panic_message(&*payload)),
                Err(err) => Err(format!("spawn failed: {}", err)),
            };
            if let Err(reason) = outcome {
                first_failure.get_or_insert(MatmulError::WorkerFailure { block, reason });
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
