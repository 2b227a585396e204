use std::{path::PathBuf, process::ExitCode};

use cadence::TypingAnalytics;
use clap::Parser;

use crate::{
    config::{OutputFormat, Settings},
    error::AppError,
    recording::Recording,
    report::Report,
};

mod config;
mod error;
mod recording;
mod report;

/// Replays a recorded typing attempt and reports how it went
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
struct Cli {
    /// Recording of the attempt (TOML)
    recording: PathBuf,

    /// Directory holding `settings.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overrides the configured one
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

fn run(cli: Cli) -> Result<String, AppError> {
    let settings = Settings::load(cli.config)?;
    let format = cli.format.unwrap_or(settings.format);
    log::debug!("Reporting as {format}");

    let recording = Recording::load(&cli.recording)?;
    let mut analytics = TypingAnalytics::new().with_configuration(settings.analytics);
    let replay = recording.replay(&mut analytics);
    let report = Report::new(replay, &recording.target, analytics.summary());

    Ok(match format {
        OutputFormat::Human => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::debug!("{error:?}");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
