use clap::Parser;
use lp_features::{Analyzer, ExtractorConfig, input, output};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };

    // CLI flags override the config file
    let mut analyzer = Analyzer::new(config).with_checkpoint(args.checkpoint_path());
    if let Some(concurrency) = args.concurrency {
        analyzer = analyzer.with_max_concurrency(concurrency);
    }
    if let Some(retries) = args.retries {
        analyzer = analyzer.with_max_retries(retries);
    }
    // Override the WebDriver URL with an environment variable if provided
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        if !url.is_empty() {
            analyzer = analyzer.with_webdriver_url(&url);
        }
    }
    if let Some(url) = &args.webdriver_url {
        analyzer = analyzer.with_webdriver_url(url);
    }
    if args.no_follow {
        analyzer = analyzer.with_follow_destination(false);
    }

    let rows = input::read_input(&args.input)?;
    ::log::info!(
        "Starting feature extraction for {} URLs from {}",
        rows.len(),
        args.input.display()
    );

    let (records, summary) = match analyzer.run(rows).await {
        Ok(done) => done,
        Err(e) => {
            ::log::error!("Feature extraction failed: {}", e);
            return Err(e.into());
        }
    };

    output::write_results(&args.output, &records)?;
    ::log::info!(
        "Done: {} feature rows, {} error rows, {} skipped as already processed",
        summary.feature_rows,
        summary.error_rows,
        summary.skipped
    );
    Ok(())
}
