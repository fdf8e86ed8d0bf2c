use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::application::AdsImportUseCase;
use crate::domain::ads::{ConversionReport, ExportConfig, OutputVariant, Substitution};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ConfigService;

#[derive(Parser, Debug)]
#[command(name = "adsheet", version, about = "Convert spreadsheet exports into ad import CSV files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a sheet for one market, or for every market in a config file
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source sheet (ignored with --config)
    #[arg(required_unless_present = "config")]
    pub input: Option<PathBuf>,

    /// Market file describing inputs and target markets
    #[arg(short, long, conflicts_with_all = ["output", "base_url", "replace", "variant"])]
    pub config: Option<PathBuf>,

    #[arg(short, long, required_unless_present = "config")]
    pub output: Option<PathBuf>,

    /// Landing page for rows without a usable final URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// basic, split or full
    #[arg(long)]
    pub variant: Option<OutputVariant>,

    /// Literal replacement FROM=TO, applied in the order given
    #[arg(short = 'r', long = "replace", value_name = "FROM=TO")]
    pub replace: Vec<Substitution>,

    /// Do not prefix the output with a UTF-8 BOM
    #[arg(long)]
    pub no_bom: bool,

    /// Print conversion reports as JSON
    #[arg(long)]
    pub json: bool,
}

/// A conversion to run: market label, output path and its settings
struct Job {
    name: String,
    output: PathBuf,
    config: ExportConfig,
}

pub fn dispatch(cli: Cli) -> ExitCode {
    let failed = match cli.command {
        Command::Convert(args) => convert(&args),
    };

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run every planned conversion; returns the number that failed
fn convert(args: &ConvertArgs) -> usize {
    let (input, jobs) = match plan(args) {
        Ok(planned) => planned,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "cannot start conversion");
            return 1;
        }
    };

    let mut reports = Vec::new();
    let mut failed = 0usize;

    for job in jobs {
        info!(market = %job.name, output = %job.output.display(), "generating import file");

        match run_job(&input, &job) {
            Ok(report) => {
                info!(market = %job.name, "{}", report.summary());
                reports.push(report);
            }
            Err(e) => {
                failed += 1;
                error!(market = %job.name, kind = e.kind(), error = %e, "conversion failed");
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "failed to serialize reports"),
        }
    }

    failed
}

fn run_job(input: &Path, job: &Job) -> Result<ConversionReport> {
    AdsImportUseCase::new(job.config.clone()).convert_file(input, &job.output)
}

fn plan(args: &ConvertArgs) -> Result<(PathBuf, Vec<Job>)> {
    if let Some(config_path) = &args.config {
        let service = ConfigService::new(config_path);
        let file = service.load()?;
        info!(config = %service.path().display(), markets = file.markets.len(), "loaded market file");

        let input = file
            .resolve_input()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                let tried: Vec<String> = file.inputs.iter().map(|p| p.display().to_string()).collect();
                AppError::MissingFile(tried.join(", "))
            })?;

        let jobs = file
            .markets
            .into_iter()
            .map(|m| Job {
                name: m.name,
                output: m.output,
                config: m.export,
            })
            .collect();

        return Ok((input, jobs));
    }

    let input = args
        .input
        .clone()
        .ok_or_else(|| AppError::ValidationError("an input file is required".to_string()))?;
    let output = args
        .output
        .clone()
        .ok_or_else(|| AppError::ValidationError("--output is required".to_string()))?;

    let mut config = ExportConfig::default();
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    config.substitutions = args.replace.clone();
    config.write_bom = !args.no_bom;

    let job = Job {
        name: "default".to_string(),
        output,
        config,
    };

    Ok((input, vec![job]))
}
