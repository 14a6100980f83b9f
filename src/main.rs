//! Blog Archiver - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use blog_archiver::{
    api::BlogApi,
    cli::Args,
    config::{validate_config, Config},
    download::Archiver,
    error::{exit_codes, Result},
    output::{
        print_banner, print_collection_stats, print_config_summary, print_error, print_info,
        print_run_stats, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            if e.is_config() {
                ExitCode::from(exit_codes::CONFIG_ERROR as u8)
            } else {
                ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8)
            }
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_info(&format!(
            "No configuration file at {}, using defaults with CLI arguments",
            config_path.display()
        ));
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    print_config_summary(
        &config.targets.blogs,
        &config.options.feed.to_string(),
        &config.output_directory().display().to_string(),
        config.effective_conns(),
    );

    if !config.options.no_media && config.options.conns == 0 {
        print_warning("No download connections configured, media will not be saved");
    }

    let config = Arc::new(config);
    let api = Arc::new(BlogApi::from_config(&config)?);

    let summary = Archiver::new(Arc::clone(&config), api).run().await?;

    for state in &summary.collections {
        print_collection_stats(state);
    }
    print_run_stats(&summary);

    if summary.collections_failed() > 0 {
        print_error(&format!(
            "{} blog(s) could not be fully archived",
            summary.collections_failed()
        ));
        return Ok(exit_codes::SOME_COLLECTIONS_FAILED);
    }

    Ok(exit_codes::SUCCESS)
}
