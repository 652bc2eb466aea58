//! Benchmark runner: naive vs row-block multi-threaded matmul.

use matmul_rowblock::config::USAGE;
use matmul_rowblock::runner::run_benchmark;
use matmul_rowblock::timing::TrialReport;
use matmul_rowblock::{BenchConfig, Result, Variant};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match BenchConfig::from_args(std::env::args().skip(1)) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &BenchConfig) -> Result<()> {
    println!("=== Matrix Multiplication Benchmark ===\n");
    println!(
        "A: {}×{}  B: {}×{}  trials: {}  threads: {}\n",
        config.m, config.k, config.k, config.n, config.trials, config.threads
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut results: Vec<(Variant, TrialReport)> = Vec::new();
    for &variant in &config.variants {
        println!("{}", variant.label());
        println!("{}", "-".repeat(50));

        let report = run_benchmark(config, variant, &mut rng, |trial, elapsed| {
            println!("Trial {}: {:.2}sec", trial + 1, elapsed.as_secs_f64());
        })?;

        println!(
            "Ran {} times with an average runtime of {:.1}ms\n",
            report.len(),
            report.mean_ms()
        );
        results.push((variant, report));
    }

    print_summary(config, &results);
    Ok(())
}

fn print_summary(config: &BenchConfig, results: &[(Variant, TrialReport)]) {
    println!("{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    for line in summary_lines(config, results) {
        println!("{}", line);
    }
}

/// One line per variant; the speedup column only appears when there is a
/// baseline to compare against.
fn summary_lines(config: &BenchConfig, results: &[(Variant, TrialReport)]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let compare = results.len() > 1;
    let baseline_ms = results.first().map_or(0.0, |(_, r)| r.mean_ms());

    for (variant, report) in results {
        let mut line = format!(
            "{:16} {:10.1} ms  {:8.2} GFLOPS",
            variant.label(),
            report.mean_ms(),
            report.gflops(config.flops())
        );
        if compare {
            let speedup = if report.mean_ms() > 0.0 {
                baseline_ms / report.mean_ms()
            } else {
                0.0
            };
            line.push_str(&format!("  ({:.1}×)", speedup));
        }
        lines.push(line);
    }

    lines.push("=".repeat(60));
    if let (true, Some((baseline, _))) = (compare, results.first()) {
        lines.push(format!(
            "\nSpeedup relative to {}. Higher is better.",
            baseline.label()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn report(ms: u64) -> TrialReport {
        let mut report = TrialReport::default();
        report.record(Duration::from_millis(ms));
        report
    }

    #[test]
    fn test_single_variant_has_no_speedup() {
        let config = BenchConfig::default();
        let lines = summary_lines(&config, &[(Variant::Threaded, report(40))]);

        assert!(lines.iter().all(|l| !l.contains('×')), "{:?}", lines);
        assert!(lines.iter().all(|l| !l.contains("Speedup")));
        assert!(lines[0].starts_with(Variant::Threaded.label()));
    }

    #[test]
    fn test_both_variants_show_speedup_against_naive() {
        let config = BenchConfig::default();
        let results = [(Variant::Naive, report(80)), (Variant::Threaded, report(20))];
        let lines = summary_lines(&config, &results);

        assert!(lines[0].ends_with("(1.0×)"), "{:?}", lines);
        assert!(lines[1].ends_with("(4.0×)"), "{:?}", lines);
        assert!(lines.last().unwrap().contains(Variant::Naive.label()));
    }
}
