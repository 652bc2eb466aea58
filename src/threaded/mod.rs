//! Multi-threaded GEMM.
//!
//! The left operand and the output are cut into one contiguous row block per
//! thread; every thread runs the naive kernel on its block against the whole
//! right operand. Thread count is fixed by the caller and must divide the
//! number of rows.

pub mod row_blocks;

pub use row_blocks::{RowBlock, WorkItem, matmul_row_blocks_mt, partition_rows, plan_work};
