use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Strata workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the BFS benchmarks and write a report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Also benchmark the rayon engine
        #[arg(long, default_value_t = false)]
        rayon: bool,
    },
}

const BENCH: &str = "bfs_benchmark";
const REPORT_PATH: &str = "benchmark_results/report.md";

/// Mean throughput per benchmark, keyed by `group/function` then parameter.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            rayon,
        } => {
            if !report_only {
                run_benchmarks(quick, rayon)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, rayon: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let mut build = Command::new("cargo");
    build.args(["build", "--bench", BENCH, "--release"]);
    if rayon {
        build.args(["--features", "parallel"]);
    }
    if !build.status()?.success() {
        bail!("Failed to compile benchmarks");
    }

    println!("\n>>> Running {BENCH}");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", BENCH]);
    if rayon {
        cmd.args(["--features", "parallel"]);
    }

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.args(["--measurement-time", "0.1", "--noplot", "--sample-size", "10"]);
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run {BENCH}"))?;
    if !status.success() {
        bail!("{BENCH} failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new(REPORT_PATH);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;
    write_report(&mut file, &results)?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn write_report(out: &mut impl Write, results: &Results) -> Result<()> {
    writeln!(out, "# BFS Benchmark Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "Throughput in elements per second; speedup is relative to the lowest parameter of the row."
    )?;
    writeln!(out)?;

    // Columns: the union of all parameters, numeric order where possible.
    let mut params: Vec<&String> = results.values().flat_map(BTreeMap::keys).collect();
    params.sort_by_key(|p| (p.parse::<u64>().unwrap_or(u64::MAX), p.to_string()));
    params.dedup();

    write!(out, "| Benchmark |")?;
    for param in &params {
        write!(out, " {param} | speedup |")?;
    }
    writeln!(out)?;
    write!(out, "|---|")?;
    for _ in &params {
        write!(out, "---|---|")?;
    }
    writeln!(out)?;

    for (bench, row) in results {
        write!(out, "| {bench} |")?;
        let baseline = params.iter().find_map(|p| row.get(*p)).copied().unwrap_or(0.0);
        for param in &params {
            match row.get(*param) {
                Some(ops) => {
                    let rel = if baseline > 0.0 { ops / baseline } else { 0.0 };
                    write!(out, " {} | **{rel:.2}x** |", format_ops(*ops))?;
                }
                None => write!(out, " N/A | - |")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree and records the latest run of every
/// benchmark. Layout: `<group>/<function>[/<param>]/new/estimates.json`.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) == Some("report") {
            continue;
        }

        let estimates = path.join("new").join("estimates.json");
        if estimates.is_file() {
            if let Some((bench, param, ops)) = read_result(&path, &estimates)? {
                results.entry(bench).or_default().insert(param, ops);
            }
        } else {
            collect_results(&path, results)?;
        }
    }
    Ok(())
}

fn read_result(bench_dir: &Path, estimates: &Path) -> Result<Option<(String, String, f64)>> {
    let benchmark: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(bench_dir.join("new").join("benchmark.json"))?)
            .context("Malformed benchmark.json")?;
    let estimate: serde_json::Value = serde_json::from_str(&fs::read_to_string(estimates)?)
        .with_context(|| format!("Malformed {}", estimates.display()))?;

    let Some(time_ns) = estimate
        .get("mean")
        .and_then(|m| m.get("point_estimate"))
        .and_then(serde_json::Value::as_f64)
        .filter(|t| *t > 0.0)
    else {
        return Ok(None);
    };

    let elements = benchmark
        .get("throughput")
        .and_then(|t| t.get("Elements"))
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(1.0);

    let field = |name: &str| {
        benchmark
            .get(name)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    };
    let group = field("group_id").unwrap_or_default();
    let function = field("function_id");
    let param = field("value_str").unwrap_or_else(|| "-".to_string());
    let bench = match function {
        Some(function) => format!("{group}/{function}"),
        None => group,
    };

    Ok(Some((bench, param, elements * 1e9 / time_ns)))
}
