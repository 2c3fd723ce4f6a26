// scripts/benchmark.rs
use lookback_mc::analytics::lookback_analytic::MarketParameters;
use lookback_mc::math_utils::Timer;
use lookback_mc::mc::lookback::LookbackOption;
use lookback_mc::mc::mc_engine::{mc_price_lookback, mc_price_lookback_with_control_variate};
use lookback_mc::mc::payoffs::LookbackPayoff;
use lookback_mc::mc::simulation::{MonteCarloAssetSimulation, SimulationConfig};
use lookback_mc::models::gbm::Gbm;
use lookback_mc::solvers::Scheme;
use std::env;
use std::fs::File;
use std::io::Write;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    memory_gb: f64,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        let cpu_model = proc_field("/proc/cpuinfo", "model name").unwrap_or_else(|| "Unknown CPU".to_string());
        // MemTotal is reported in kB
        let memory_gb = proc_field("/proc/meminfo", "MemTotal")
            .and_then(|value| value.split_whitespace().next()?.parse::<u64>().ok())
            .map(|kb| kb as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);
        let rust_version = Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string());

        Self {
            os: env::consts::OS.to_string(),
            cpu_model,
            cpu_cores: num_cpus::get(),
            memory_gb,
            rust_version,
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

/// `key: value` lookup in a Linux /proc file; `None` elsewhere
fn proc_field(path: &str, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    content
        .lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split(':').nth(1))
        .map(|value| value.trim().to_string())
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: f64,
    standard_error: f64,
    analytic_value: Option<f64>,
    relative_error: Option<f64>,
}

impl BenchmarkResult {
    fn new(name: String, paths: usize, time_ms: f64, value: f64, standard_error: f64, analytic: Option<f64>) -> Self {
        BenchmarkResult {
            name,
            paths,
            time_ms,
            throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
            value,
            standard_error,
            analytic_value: analytic,
            relative_error: analytic.map(|a| (value - a).abs() / a),
        }
    }
}

const STEPS: usize = 252;
const FIXINGS: usize = 52;

fn market() -> MarketParameters {
    MarketParameters::new(100.0, 0.05, 0.2).expect("Valid market")
}

fn run_lookback_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let market = market();

    let paths_configs = [10_000, 50_000, 100_000];

    for &paths in &paths_configs {
        println!("Running benchmarks with {} paths...", paths);

        let config = SimulationConfig {
            paths,
            steps: STEPS,
            horizon: 1.0,
            seed: 42,
            use_antithetic: true,
            ..Default::default()
        };

        let mut timer = Timer::new();
        timer.start();
        let simulation = MonteCarloAssetSimulation::new(Gbm::from_market(&market), config)
            .expect("Valid configuration");
        let simulation_time = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            format!("Path Generation ({}k paths)", paths / 1000),
            paths,
            simulation_time,
            0.0,
            0.0,
            None,
        ));

        let option = LookbackOption::new(1.0, LookbackPayoff::FixedStrikeCall { strike: 100.0 })
            .with_monitoring(FIXINGS);
        let analytic = option.analytic_price(&market);

        timer.start();
        let plain = mc_price_lookback(&option, &simulation).expect("Valid product");
        results.push(BenchmarkResult::new(
            format!("Fixed Call MC ({}k paths)", paths / 1000),
            paths,
            timer.elapsed_ms(),
            plain.price,
            plain.standard_error,
            Some(analytic),
        ));

        timer.start();
        let controlled = mc_price_lookback_with_control_variate(&option, &simulation).expect("Valid product");
        results.push(BenchmarkResult::new(
            format!("Fixed Call CV ({}k paths)", paths / 1000),
            paths,
            timer.elapsed_ms(),
            controlled.estimate.price,
            controlled.estimate.standard_error,
            Some(analytic),
        ));
    }

    results
}

fn run_scheme_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let market = market();

    let schemes = [Scheme::Exact, Scheme::EulerMaruyama, Scheme::Milstein];
    let paths = 50_000;
    let option = LookbackOption::new(1.0, LookbackPayoff::FloatingStrikePut).with_monitoring(FIXINGS);
    let analytic = option.analytic_price(&market);

    for scheme in schemes {
        println!("Benchmarking {} scheme...", scheme.name());

        let config = SimulationConfig {
            paths,
            steps: STEPS,
            horizon: 1.0,
            seed: 42,
            scheme,
            ..Default::default()
        };

        let mut timer = Timer::new();
        timer.start();
        let simulation = MonteCarloAssetSimulation::new(Gbm::from_market(&market), config)
            .expect("Valid configuration");
        let estimate = mc_price_lookback(&option, &simulation).expect("Valid product");
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            format!("Floating Put {}", scheme.name()),
            paths,
            time_ms,
            estimate.price,
            estimate.standard_error,
            Some(analytic),
        ));
    }

    results
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;

    // Write system information as comments
    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Memory: {:.1} GB", system_info.memory_gb)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Paths,Time_ms,Throughput_paths_per_sec,Value,Standard_Error,Analytic_Value,Relative_Error"
    )?;

    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{:.6},{},{}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result.standard_error,
            result
                .analytic_value
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.6}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }

    Ok(())
}

fn main() {
    println!("lookback-mc Benchmark Suite");
    println!("===========================\n");

    // Gather system information
    println!("Gathering system information...");
    let system_info = SystemInfo::gather();

    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Memory: {:.1} GB", system_info.memory_gb);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running lookback benchmarks...");
    let mut all_results = run_lookback_benchmarks();

    println!("\nRunning scheme benchmarks...");
    all_results.extend(run_scheme_benchmarks());

    // Display results
    println!("\n{:=<96}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<96}", "");
    println!(
        "{:<32} {:>8} {:>12} {:>15} {:>10} {:>8} {:>10} {:>10}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "Value", "Stderr", "Analytic", "Rel Error"
    );
    println!("{:-<96}", "");

    for result in &all_results {
        println!(
            "{:<32} {:>8} {:>12.2} {:>15.0} {:>10.4} {:>8.4} {:>10} {:>10}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result.standard_error,
            result
                .analytic_value
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.2}%", e * 100.0))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }

    println!("{:=<96}", "");

    // Write to CSV
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("Results written to {}", filename),
        Err(e) => eprintln!("Could not write {}: {}", filename, e),
    }

    println!("\nBenchmark complete!");
    println!("\nTo reproduce these results:");
    println!("1. Use Rust version: {}", system_info.rust_version);
    println!("2. Set RUSTFLAGS: {}", system_info.rustc_flags);
    println!("3. Run: cargo run --bin benchmark --release");
    println!(
        "4. Ensure {} CPU threads available",
        system_info.rayon_threads
    );
}
