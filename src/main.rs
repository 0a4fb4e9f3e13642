use anyhow::{Context, Result};
use clap::Parser;
use sortbench::{
    algorithms,
    cli::{AnalyzeArgs, Cli, Command, ReportFormat, RunArgs, SweepArgs},
    config::BenchConfig,
    measurement::MeasurementProtocol,
    pipeline, sweep,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the level to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Cli) -> Result<BenchConfig> {
    match &args.config {
        Some(path) => BenchConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(BenchConfig::default()),
    }
}

fn run(args: &RunArgs, mut config: BenchConfig) -> Result<()> {
    args.apply(&mut config);
    let protocol = MeasurementProtocol::new(config.measurement.clone());
    let outcome = pipeline::run_benchmark(&config, protocol).context("Benchmark run failed")?;

    println!(
        "Collected {} performance measurements ({} failed cells)",
        outcome.dataset.len(),
        outcome.failures.len()
    );
    for failure in &outcome.failures {
        println!("  failed: {} - {}", failure.cell, failure.reason);
    }
    println!("Results saved to: {}", outcome.artifacts.csv_path.display());
    println!("Summary saved to: {}", outcome.artifacts.summary_path.display());
    println!("Statistical report saved to: {}", outcome.report_path.display());
    println!("JSON report saved to: {}", outcome.json_path.display());
    Ok(())
}

fn analyze(args: &AnalyzeArgs, mut config: BenchConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;
    let report = pipeline::analyze_file(
        &args.input,
        &config.matrix.expected_cells(),
        &config.analysis,
    )
    .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    let rendered = match args.format {
        ReportFormat::Text => report.to_report_string(),
        ReportFormat::Json => report.to_json()?,
    };
    println!("{}", rendered);

    if let Some(path) = &args.output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }
    Ok(())
}

fn estimate(args: &SweepArgs, mut config: BenchConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate()?;
    let routines = config.matrix.resolve_routines()?;
    let duration = sweep::estimate_duration(
        &routines,
        config.matrix.shapes.len(),
        &config.matrix.sizes,
        &config.measurement,
    );
    println!("Total tests: {}", config.matrix.total_cells());
    println!(
        "Estimated completion time: {:.1} minutes",
        duration.as_secs_f64() / 60.0
    );
    Ok(())
}

fn list() {
    println!(
        "{:<16} {:<12} {:<10} {:<7} {:<8}",
        "Algorithm", "Time", "Space", "Stable", "In-place"
    );
    for routine in algorithms::registry() {
        println!(
            "{:<16} {:<12} {:<10} {:<7} {:<8}",
            routine.name(),
            routine.time_complexity(),
            routine.space_complexity(),
            if routine.is_stable() { "yes" } else { "no" },
            if routine.is_in_place() { "yes" } else { "no" }
        );
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;

    match &args.command {
        Command::Run(run_args) => run(run_args, config),
        Command::Analyze(analyze_args) => analyze(analyze_args, config),
        Command::Estimate(sweep_args) => estimate(sweep_args, config),
        Command::List => {
            list();
            Ok(())
        }
    }
}
