use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatmulError {
    #[error("failed to allocate {elements} elements for {what}")]
    AllocationFailure { what: &'static str, elements: usize },
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}] -> [{out_rows}x{out_cols}]")]
    InvalidDimensions {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
        out_rows: usize,
        out_cols: usize,
    },
    #[error("{what}: expected {rows}x{cols}={expected} elements, got {got}")]
    LengthMismatch {
        what: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    #[error(
        "a {rows}x{cols} view at offset {offset} with stride {stride} does not fit in a buffer of length {len}"
    )]
    InvalidView {
        len: usize,
        offset: usize,
        rows: usize,
        cols: usize,
        stride: usize,
    },
    #[error("{rows} rows cannot be split evenly across {threads} workers")]
    UnevenPartition { rows: usize, threads: usize },
    #[error("worker for row block {block} failed: {reason}")]
    WorkerFailure { block: usize, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
