use anyhow::{Context, Result};
use benchtrack_core::Bench;
use serde::Deserialize;

/// Turn collector output into bench records, dispatching on the tool tag.
///
/// `pytest` output is the pytest-benchmark machine report; any other tool
/// is expected to hand over an already-shaped JSON array of bench records.
pub fn extract_benches(tool: &str, raw: &str) -> Result<Vec<Bench>> {
    match tool {
        "pytest" => from_pytest(raw),
        _ => from_generic(raw),
    }
}

// pytest-benchmark --benchmark-json output, reduced to the fields we chart
#[derive(Debug, Deserialize)]
struct PytestReport {
    benchmarks: Vec<PytestBenchmark>,
}

#[derive(Debug, Deserialize)]
struct PytestBenchmark {
    fullname: String,
    stats: PytestStats,
}

#[derive(Debug, Deserialize)]
struct PytestStats {
    ops: f64,
    stddev: f64,
    mean: f64,
    rounds: u64,
}

fn from_pytest(raw: &str) -> Result<Vec<Bench>> {
    let report: PytestReport =
        serde_json::from_str(raw).context("not a pytest-benchmark JSON report")?;

    Ok(report
        .benchmarks
        .into_iter()
        .map(|bench| Bench {
            name: bench.fullname,
            value: bench.stats.ops,
            unit: "iter/sec".to_string(),
            range: format!("stddev: {}", bench.stats.stddev),
            extra: format!(
                "mean: {} sec\nrounds: {}",
                bench.stats.mean, bench.stats.rounds
            ),
        })
        .collect())
}

fn from_generic(raw: &str) -> Result<Vec<Bench>> {
    serde_json::from_str(raw).context("not a JSON array of bench records")
}
