use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lp-features")]
#[command(about = "Extracts conversion-related features from rendered landing pages")]
#[command(version)]
pub struct Args {
    /// Input CSV with a URL column (url, landing_page, page_url, ...)
    pub input: PathBuf,

    /// Output CSV, one row per URL
    pub output: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of concurrent page analyses
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Checkpoint file used to resume interrupted runs
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// WebDriver endpoint (also read from WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Do not follow the primary CTA to its destination page
    #[arg(long)]
    pub no_follow: bool,

    /// Attempts per URL before an error row is written
    #[arg(long)]
    pub retries: Option<u32>,
}

impl Args {
    /// Default checkpoint location next to the output file
    pub fn checkpoint_path(&self) -> PathBuf {
        self.checkpoint
            .clone()
            .unwrap_or_else(|| self.output.with_extension("checkpoint.json"))
    }
}
