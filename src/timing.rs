//! Wall-clock timing of individual trials.

use crate::error::Result;
use std::time::{Duration, Instant};

/// Run `f` once between two monotonic clock samples.
pub fn time_trial<F>(f: F) -> Result<Duration>
where
    F: FnOnce() -> Result<()>,
{
    let start = Instant::now();
    f()?;
    Ok(start.elapsed())
}

/// Per-trial durations of one benchmark run.
#[derive(Debug, Clone, Default)]
pub struct TrialReport {
    runs: Vec<Duration>,
}

impl TrialReport {
    pub fn with_capacity(trials: usize) -> Self {
        Self {
            runs: Vec::with_capacity(trials),
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.runs.push(elapsed);
    }

    pub fn runs(&self) -> &[Duration] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Arithmetic mean of the recorded trials, `None` if nothing was recorded.
    pub fn mean(&self) -> Option<Duration> {
        if self.runs.is_empty() {
            return None;
        }
        let total: Duration = self.runs.iter().sum();
        let nanos = total.as_nanos() / self.runs.len() as u128;
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }

    pub fn mean_ms(&self) -> f64 {
        self.mean().map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }

    /// Throughput at the mean runtime.
    pub fn gflops(&self, flops: f64) -> f64 {
        match self.mean() {
            Some(d) if !d.is_zero() => flops / d.as_secs_f64() / 1e9,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatmulError;

    #[test]
    fn test_mean_of_trials() {
        let mut report = TrialReport::with_capacity(3);
        assert_eq!(report.mean(), None);

        report.record(Duration::from_millis(10));
        report.record(Duration::from_millis(20));
        report.record(Duration::from_millis(30));

        assert_eq!(report.len(), 3);
        assert_eq!(report.mean(), Some(Duration::from_millis(20)));
        assert!((report.mean_ms() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_uses_full_trial_count() {
        let mut report = TrialReport::default();
        for _ in 0..1000 {
            report.record(Duration::from_secs(3));
        }
        report.record(Duration::from_nanos(1));
        // integer nanosecond mean, rounded down
        assert_eq!(report.mean(), Some(Duration::from_nanos(2_997_002_997)));
    }

    #[test]
    fn test_gflops_at_mean() {
        let mut report = TrialReport::default();
        assert_eq!(report.gflops(1e9), 0.0);

        report.record(Duration::from_millis(500));
        assert!((report.gflops(1e9) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_trial_propagates_error() {
        let err = time_trial(|| Err(MatmulError::UnevenPartition { rows: 3, threads: 2 }));
        assert!(err.is_err());

        let elapsed = time_trial(|| {
            std::thread::sleep(Duration::from_millis(2));
            Ok(())
        })
        .unwrap();
        assert!(elapsed >= Duration::from_millis(2));
    }
}
