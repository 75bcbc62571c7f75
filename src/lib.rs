// Re-export modules
pub mod config;
pub mod crawlers;
pub mod cta;
pub mod destination;
pub mod error;
pub mod features;
pub mod filter;
pub mod forms;
pub mod input;
pub mod layout;
pub mod locators;
pub mod output;
pub mod parsers;
pub mod patterns;
pub mod pipeline;
pub mod results;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use input::InputRow;
pub use results::{FeatureValue, Record};
pub use session::RunSummary;

use crawlers::renderer::Renderer;
use crawlers::web::WebDriverRenderer;
use session::Session;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for a batch feature-extraction run
pub struct Analyzer {
    config: ExtractorConfig,
    checkpoint_path: Option<PathBuf>,
}

impl Analyzer {
    /// Create a new Analyzer with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            checkpoint_path: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(ExtractorConfig::from_file(path)?))
    }

    /// Set the number of page analyses in flight at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the number of attempts per URL
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Enable or disable following the primary CTA to its destination page
    pub fn with_follow_destination(mut self, follow: bool) -> Self {
        self.config.follow_cta_destination = follow;
        self
    }

    /// Persist progress to this checkpoint file and resume from it
    pub fn with_checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Analyse `rows` in a WebDriver-controlled browser
    pub async fn run(self, rows: Vec<InputRow>) -> Result<(Vec<Record>, RunSummary)> {
        self.config.validate()?;
        let renderer = WebDriverRenderer::new(&self.config);
        renderer.check_connection().await?;
        self.run_with_renderer(Arc::new(renderer), rows).await
    }

    /// Analyse `rows` with any renderer
    pub async fn run_with_renderer(
        self,
        renderer: Arc<dyn Renderer>,
        rows: Vec<InputRow>,
    ) -> Result<(Vec<Record>, RunSummary)> {
        self.config.validate()?;
        let mut session = Session::resume(self.checkpoint_path, self.config.checkpoint_interval)?;
        let summary = crawlers::batch::run(renderer, rows, &self.config, &mut session).await?;
        Ok((session.into_results(), summary))
    }
}
