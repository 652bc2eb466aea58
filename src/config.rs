//! Benchmark configuration.

use crate::error::{MatmulError, Result};

pub const USAGE: &str = "\
Usage: matmul-rowblock [OPTIONS]

Options:
  -m, --rows <M>          rows of A and C [default: 4096]
  -k, --inner <K>         columns of A, rows of B [default: 64]
  -n, --cols <N>          columns of B and C [default: 4096]
      --trials <T>        number of timed trials [default: 10]
      --threads <P>       worker threads, must divide M [default: 8]
      --seed <S>          RNG seed for the input matrices [default: random]
      --variant <V>       naive, threaded or both [default: both]
  -h, --help              print this help";

/// Which multiplication a trial runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Naive,
    Threaded,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Naive => "Naive (i-j-k)",
            Variant::Threaded => "Row-block MT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub m: usize,
    pub k: usize,
    pub n: usize,
    pub trials: usize,
    pub threads: usize,
    pub seed: Option<u64>,
    pub variants: Vec<Variant>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            m: 4096,
            k: 64,
            n: 4096,
            trials: 10,
            threads: 8,
            seed: None,
            variants: vec![Variant::Naive, Variant::Threaded],
        }
    }
}

fn parse_num<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.ok_or_else(|| MatmulError::InvalidConfig(format!("{} needs a value", flag)))?;
    value
        .parse()
        .map_err(|_| MatmulError::InvalidConfig(format!("{}: not a number: {:?}", flag, value)))
}

impl BenchConfig {
    /// Parse command-line flags (without the program name) on top of the
    /// defaults. Returns `Ok(None)` when help was requested.
    pub fn from_args<I>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-m" | "--rows" => config.m = parse_num(&flag, args.next())?,
                "-k" | "--inner" => config.k = parse_num(&flag, args.next())?,
                "-n" | "--cols" => config.n = parse_num(&flag, args.next())?,
                "--trials" => config.trials = parse_num(&flag, args.next())?,
                "--threads" => config.threads = parse_num(&flag, args.next())?,
                "--seed" => config.seed = Some(parse_num(&flag, args.next())?),
                "--variant" => {
                    config.variants = match args.next().as_deref() {
                        Some("naive") => vec![Variant::Naive],
                        Some("threaded") => vec![Variant::Threaded],
                        Some("both") => vec![Variant::Naive, Variant::Threaded],
                        other => {
                            return Err(MatmulError::InvalidConfig(format!(
                                "--variant: expected naive, threaded or both, got {:?}",
                                other
                            )));
                        }
                    }
                }
                "-h" | "--help" => return Ok(None),
                _ => {
                    return Err(MatmulError::InvalidConfig(format!(
                        "unknown argument {:?}",
                        flag
                    )));
                }
            }
        }

        config.validate()?;
        Ok(Some(config))
    }

    /// Reject configurations that could never run, before anything is
    /// allocated.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(MatmulError::InvalidConfig("trials must be at least 1".into()));
        }
        if self.variants.contains(&Variant::Threaded)
            && (self.threads == 0 || self.m % self.threads != 0)
        {
            return Err(MatmulError::UnevenPartition {
                rows: self.m,
                threads: self.threads,
            });
        }
        Ok(())
    }

    /// Floating point operations in one product (one multiply and one add
    /// per inner step).
    pub fn flops(&self) -> f64 {
        2.0 * self.m as f64 * self.k as f64 * self.n as f64
    }
}
