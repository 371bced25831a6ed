// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use npresso::{
    AppError, BookmarkOutcome, CommandLineInput, ExportConfig, ExportReport, NotionHttpClient,
    PageExporter, WebClient,
};
use std::fs;
use std::process::ExitCode;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("npresso.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the remote clients and runs one export.
async fn execute_export(config: &ExportConfig) -> Result<ExportReport, AppError> {
    let notion = NotionHttpClient::new(&config.api_key)?;
    let web = WebClient::new()?;
    PageExporter::new(config, &notion, &web, &web).export().await
}

/// Prints where things ended up.
fn report_completion(report: &ExportReport) {
    let title = report.title.as_deref().unwrap_or("untitled");
    println!(
        "📄 Exported '{}' ({} blocks, {} images, {} bookmarks)",
        title, report.stats.blocks, report.stats.images, report.stats.bookmarks
    );

    match &report.bookmarks {
        BookmarkOutcome::Enriched { count } if *count > 0 => {
            println!("✓ Added metadata to {} bookmark(s)", count);
        }
        BookmarkOutcome::Failed { error } => {
            eprintln!("⚠️  Bookmarks saved without metadata: {}", error);
        }
        _ => {}
    }

    for failed in &report.images.failed {
        eprintln!("⚠️  Image kept as remote URL: {} ({})", failed.url, failed.error);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Could not initialize logging: {}", e);
    }

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot read the current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match ExportConfig::resolve(cli, &working_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute_export(&config).await {
        Ok(report) => {
            report_completion(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("Export failed: {:?}", e);
            eprintln!("Error: {}", e);
            if let AppError::NotionApi { code, .. } = &e {
                if let Some(hint) = code.hint() {
                    eprintln!("Hint: {}", hint);
                }
            }
            ExitCode::FAILURE
        }
    }
}
