use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use env_logger::{Builder, Env};
use iphone_rename_core::{
    app_paths, load_config, run_directory, AppConfig, CaptureMoment, ExifCaptureReader,
    RunOptions, RunReport,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "iphone-rename")]
#[command(about = "Renames iPhone photos and live photo clips after their capture time")]
struct Cli {
    /// Directory holding IMG_XXXX.JPEG / IMG_XXXX.MOV files
    directory: Option<PathBuf>,
    /// "true" only simulates the renames, "false" performs them; any other text keeps dry run on
    dry_run: Option<String>,
    /// Photos captured before this moment are left alone, e.g. "2010-01-01 00.00.00"
    earliest_valid: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Log)]
    output: OutputFormat,
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long, default_value_t = false)]
    show_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Log,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config().unwrap_or_else(|err| {
        eprintln!("warning: failed to load config file, using defaults: {err:#}");
        AppConfig::default()
    });

    let level = cli.log_level.as_deref().unwrap_or(config.log_level.as_str());
    Builder::from_env(Env::default().default_filter_or(level))
        .format_target(false)
        .init();

    if cli.show_config {
        return cmd_config_show(&config);
    }

    let Some(directory) = cli.directory.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    cmd_rename(&cli, directory, &config)
}

fn cmd_rename(cli: &Cli, directory: PathBuf, config: &AppConfig) -> Result<()> {
    let dry_run = match cli.dry_run.as_deref() {
        None if !config.dry_run_default => {
            warn!("dry_run_default = false in the config file, renaming for real");
            false
        }
        None => true,
        Some(text) => parse_dry_run(text).unwrap_or_else(|| {
            warn!("unrecognized dry-run flag {text:?}, keeping dry run on");
            true
        }),
    };

    let earliest_valid = match cli.earliest_valid.as_deref() {
        None => config.earliest_valid_moment(),
        Some(text) => {
            let parsed = CaptureMoment::parse(text);
            if parsed.is_none() {
                warn!("cannot parse earliest valid moment {text:?}, no lower bound applied");
            }
            parsed
        }
    };

    info!("iPhone photo rename (capture time from EXIF DateTimeOriginal)");

    let options = RunOptions {
        directory,
        dry_run,
        earliest_valid,
    };
    let report = run_directory(&options, &ExifCaptureReader)
        .with_context(|| format!("cannot process {}", options.directory.display()))?;

    if let OutputFormat::Json = cli.output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    print_summary(&report);

    if dry_run {
        eprintln!("dry run: no files were changed. Pass `false` as the second argument to rename.");
    }

    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn parse_dry_run(text: &str) -> Option<bool> {
    match text.trim() {
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn print_summary(report: &RunReport) {
    let stats = &report.stats;
    eprintln!(
        "summary: scanned={} photos={} videos={} renamed={} simulated={} move_failures={} unsupported={} invalid_moment={} orphan_videos={} unresolved_names={}",
        stats.scanned_files,
        stats.photos,
        stats.videos,
        stats.renamed,
        stats.simulated,
        stats.move_failures,
        stats.unsupported,
        stats.invalid_moment,
        stats.orphan_videos,
        stats.unresolved_names
    );
}
