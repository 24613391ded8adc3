//! Command-line front end: split contour areas into noise and valid objects.

use area_partition::input::read_areas;
use area_partition::utils::parallel_map;
use area_partition::{
    AreaPartitioner, Dispersion, Objective, PartitionConfig, PartitionMode, PartitionReport,
    RefinementConfig,
};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "area-partition")]
#[command(about = "Separate object contours from noise by clustering their areas")]
#[command(version)]
struct Cli {
    /// Area files (numbers separated by whitespace or commas, `#` comments).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of clusters: binary or ternary.
    #[arg(long)]
    mode: Option<PartitionMode>,

    /// Convergence objective: within-variance or standard-error.
    #[arg(long)]
    objective: Option<Objective>,

    /// Cutoff dispersion: cluster-std-dev or global-standard-error.
    #[arg(long)]
    dispersion: Option<Dispersion>,

    /// Cutoff multiplier k in `mean - k * dispersion`.
    #[arg(long)]
    multiplier: Option<f64>,

    /// Iteration cap.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Minimum noise/anchor separation in summed standard deviations.
    #[arg(long)]
    min_separation: Option<f64>,

    /// Enable the refinement pass with this multiplier.
    #[arg(long)]
    refine_multiplier: Option<f64>,

    /// Dispersion used by the refinement pass.
    #[arg(long, default_value = "cluster-std-dev")]
    refine_dispersion: Dispersion,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    input: String,
    #[serde(flatten)]
    outcome: FileOutcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum FileOutcome {
    Report(PartitionReport),
    Error(String),
}

#[derive(Debug, Serialize)]
struct RunReport {
    config: PartitionConfig,
    files: Vec<FileReport>,
}

fn build_config(cli: &Cli) -> CliResult<PartitionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| -> CliError { format!("Failed to read {}: {}", path.display(), e).into() })?;
            PartitionConfig::from_json(&json)?
        }
        None => PartitionConfig::default(),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(objective) = cli.objective {
        config.objective = objective;
    }
    if let Some(dispersion) = cli.dispersion {
        config.dispersion = dispersion;
    }
    if let Some(k) = cli.multiplier {
        config.multiplier = k;
    }
    if let Some(n) = cli.max_iterations {
        config.max_iterations = n;
    }
    if let Some(separation) = cli.min_separation {
        config.min_separation = separation;
    }
    if let Some(k) = cli.refine_multiplier {
        config.refinement = Some(RefinementConfig::new(k).with_dispersion(cli.refine_dispersion));
    }

    config.validate()?;
    Ok(config)
}

fn run_file(partitioner: &AreaPartitioner, path: &Path) -> FileReport {
    let outcome = read_areas(path)
        .and_then(|areas| partitioner.partition_areas(&areas))
        .map(|result| result.report());

    let input = path.display().to_string();
    match outcome {
        Ok(report) => {
            tracing::info!(
                "{}: {} kept, {} rejected, cutoff={:.3}, means={:?}",
                input,
                report.num_survivors,
                report.num_rejected,
                report.cutoff,
                report.cluster_means,
            );
            if !report.converged {
                tracing::warn!("{}: iteration cap reached before convergence", input);
            }
            FileReport {
                input,
                outcome: FileOutcome::Report(report),
            }
        }
        Err(e) => {
            tracing::error!("{}: {}", input, e);
            FileReport {
                input,
                outcome: FileOutcome::Error(e.to_string()),
            }
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::info!(
        "Partitioning {} file(s), mode={}, k={}",
        cli.inputs.len(),
        config.mode,
        config.multiplier
    );

    let partitioner = AreaPartitioner::new(config.clone());
    let files = parallel_map(&cli.inputs, |path| run_file(&partitioner, path));
    let failed = files
        .iter()
        .filter(|f| matches!(f.outcome, FileOutcome::Error(_)))
        .count();

    let json = serde_json::to_string_pretty(&RunReport { config, files })?;
    match &cli.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    if failed > 0 {
        return Err(format!("{} of {} input file(s) failed", failed, cli.inputs.len()).into());
    }
    Ok(())
}
