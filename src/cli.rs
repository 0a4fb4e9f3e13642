//! CLI argument parsing for sortbench

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::BenchConfig;
use crate::measurement::MeasurementConfig;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sortbench")]
#[command(version)]
#[command(about = "Statistically rigorous benchmarking of sorting routines", long_about = None)]
pub struct Cli {
    /// TOML configuration file (command-line flags override its values)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep the test matrix, persist samples and write the analysis report
    Run(RunArgs),
    /// Analyze a previously written sample file
    Analyze(AnalyzeArgs),
    /// Print the estimated duration of a sweep without running it
    Estimate(SweepArgs),
    /// List the available sort routines
    List,
}

/// Test matrix overrides
#[derive(Args, Debug, Default)]
pub struct MatrixArgs {
    /// Sort routines to benchmark (comma-separated, e.g. "quick,merge")
    #[arg(short, long, value_delimiter = ',', value_name = "NAMES")]
    pub algorithms: Vec<String>,

    /// Data shapes (comma-separated, e.g. "Random,Sorted")
    #[arg(short, long, value_delimiter = ',', value_name = "SHAPES")]
    pub shapes: Vec<String>,

    /// Input sizes (comma-separated, e.g. "100,200,400")
    #[arg(long, value_delimiter = ',', value_name = "SIZES")]
    pub sizes: Vec<usize>,
}

impl MatrixArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, config: &mut BenchConfig) {
        if !self.algorithms.is_empty() {
            config.matrix.algorithms = self.algorithms.clone();
        }
        if !self.shapes.is_empty() {
            config.matrix.shapes = self.shapes.clone();
        }
        if !self.sizes.is_empty() {
            config.matrix.sizes = self.sizes.clone();
        }
    }
}

/// Measurement protocol overrides
#[derive(Args, Debug, Default)]
pub struct MeasurementArgs {
    /// Small, pause-free measurement settings for smoke runs
    #[arg(long)]
    pub quick: bool,

    /// Warm-up iterations per cell
    #[arg(long, value_name = "N")]
    pub warmup: Option<usize>,

    /// Measured iterations per cell
    #[arg(long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Pause before every measured iteration, in milliseconds
    #[arg(long = "stabilization-ms", value_name = "MS")]
    pub stabilization_ms: Option<u64>,

    /// Pause between warm-up and sampling, in milliseconds
    #[arg(long = "settle-ms", value_name = "MS")]
    pub settle_ms: Option<u64>,
}

impl MeasurementArgs {
    pub fn apply(&self, config: &mut BenchConfig) {
        if self.quick {
            config.measurement = MeasurementConfig::quick();
        }
        if let Some(n) = self.warmup {
            config.measurement.warmup_iterations = n;
        }
        if let Some(n) = self.iterations {
            config.measurement.measurement_iterations = n;
        }
        if let Some(ms) = self.stabilization_ms {
            config.measurement.stabilization_delay_ms = ms;
        }
        if let Some(ms) = self.settle_ms {
            config.measurement.settle_delay_ms = ms;
        }
    }
}

/// Everything that shapes a sweep
#[derive(Args, Debug, Default)]
pub struct SweepArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    #[command(flatten)]
    pub measurement: MeasurementArgs,
}

impl SweepArgs {
    pub fn apply(&self, config: &mut BenchConfig) {
        self.matrix.apply(config);
        self.measurement.apply(config);
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Directory for sample files and reports
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut BenchConfig) {
        self.sweep.apply(config);
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Sample file written by `sortbench run`
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Matrix the sample file was recorded with; completeness is checked
    /// against it
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Report format printed to stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Also write the report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Data shape used for complexity fitting
    #[arg(long = "complexity-shape", value_name = "SHAPE")]
    pub complexity_shape: Option<String>,
}

impl AnalyzeArgs {
    pub fn apply(&self, config: &mut BenchConfig) {
        self.matrix.apply(config);
        if let Some(shape) = &self.complexity_shape {
            config.analysis.complexity_shape = shape.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_run_with_matrix_overrides() {
        let cli = Cli::parse_from([
            "sortbench",
            "run",
            "--algorithms",
            "quick,merge",
            "--sizes",
            "100,200",
            "--quick",
            "-o",
            "out",
        ]);
        let Command::Run(run) = cli.command else {
            panic!("expected run subcommand");
        };
        let mut config = BenchConfig::default();
        run.apply(&mut config);
        assert_eq!(config.matrix.algorithms, vec!["quick", "merge"]);
        assert_eq!(config.matrix.sizes, vec![100, 200]);
        assert_eq!(config.matrix.shapes.len(), 5);
        assert_eq!(config.measurement, MeasurementConfig::quick());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_iteration_flags_override_quick() {
        let cli = Cli::parse_from(["sortbench", "run", "--quick", "--iterations", "9"]);
        let Command::Run(run) = cli.command else {
            panic!("expected run subcommand");
        };
        let mut config = BenchConfig::default();
        run.apply(&mut config);
        assert_eq!(config.measurement.measurement_iterations, 9);
        assert_eq!(config.measurement.warmup_iterations, 10);
    }

    #[test]
    fn test_cli_analyze_defaults() {
        let cli = Cli::parse_from(["sortbench", "analyze", "results.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(args.input, PathBuf::from("results.csv"));
        assert_eq!(args.format, ReportFormat::Text);
        assert!(args.output.is_none());

        let mut config = BenchConfig::default();
        args.apply(&mut config);
        assert_eq!(config.matrix, crate::sweep::TestMatrix::default());
    }

    #[test]
    fn test_cli_analyze_matrix_overrides() {
        let cli = Cli::parse_from([
            "sortbench",
            "analyze",
            "results.csv",
            "--algorithms",
            "insertion",
            "--shapes",
            "Random",
            "--sizes",
            "20,40,80",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        let mut config = BenchConfig::default();
        args.apply(&mut config);
        assert_eq!(config.matrix.total_cells(), 3);
        assert_eq!(
            config.matrix.expected_cells()[0],
            crate::sample::Cell::new("Insertion Sort", "Random", 20)
        );
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sortbench", "list", "--debug", "--config", "bench.toml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("bench.toml")));
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sortbench"]).is_err());
    }
}
