use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a feature-extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum number of page analyses in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Attempts per URL before an error record is written
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts on the same URL
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Hard timeout for a single navigation
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Lower bound of the randomized delay before each navigation
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the randomized delay before each navigation
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Wait after load before the DOM is read
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Completed URLs between two checkpoint writes
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Whether the primary CTA link is followed to score the destination page
    #[serde(default = "default_true")]
    pub follow_cta_destination: bool,

    /// Hostnames treated as the operator's own pages (`is_internal`)
    #[serde(default)]
    pub internal_hosts: Vec<String>,

    /// Browser identities rotated per page
    #[serde(default = "default_identities")]
    pub identities: Vec<BrowserIdentity>,

    /// Run the browser headless
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Empirical thresholds used by the detectors
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// User agent and window size presented to the target site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserIdentity {
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
}

/// Named detector thresholds, all overridable from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Below this many words with no interactive elements the page counts as blocked
    pub bot_blocked_words: usize,
    /// Up to this many words with no interactive elements the page counts as partially blocked
    pub bot_partial_words: usize,
    /// Forms lose points for every user-facing field past this count
    pub form_field_penalty_after: usize,
    /// Forms with more user-facing fields than this are ignored
    pub form_max_fields: usize,
    /// Minimum words for a div to count as a section
    pub section_div_min_words: usize,
    /// A div must have more child elements than this to count as a section
    pub section_div_min_children: usize,
    /// Cap applied to the div-based section count
    pub section_div_cap: usize,
    /// CTA candidates shorter than this (in chars) are skipped
    pub cta_min_text_chars: usize,
    /// CTA candidates longer than this (in chars) are skipped
    pub cta_max_text_chars: usize,
    /// Length the reported CTA text is cut to
    pub cta_result_text_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            bot_blocked_words: 50,
            bot_partial_words: 2000,
            form_field_penalty_after: 8,
            form_max_fields: 20,
            section_div_min_words: 50,
            section_div_min_children: 2,
            section_div_cap: 20,
            cta_min_text_chars: 2,
            cta_max_text_chars: 100,
            cta_result_text_chars: 50,
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_max_concurrency() -> usize {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_secs() -> u64 {
    5
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_min_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    2000
}

fn default_settle_delay_ms() -> u64 {
    1500
}

fn default_checkpoint_interval() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_identities() -> Vec<BrowserIdentity> {
    vec![
        BrowserIdentity {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            width: 1920,
            height: 1080,
        },
        BrowserIdentity {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            width: 1440,
            height: 900,
        },
        BrowserIdentity {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            width: 1366,
            height: 768,
        },
    ]
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            max_concurrency: default_max_concurrency(),
            max_retries: default_max_retries(),
            retry_backoff_secs: default_retry_backoff_secs(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            checkpoint_interval: default_checkpoint_interval(),
            follow_cta_destination: true,
            internal_hosts: Vec::new(),
            identities: default_identities(),
            headless: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(ExtractError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(ExtractError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ExtractError::Config(format!(
                "min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if self.identities.is_empty() {
            return Err(ExtractError::Config(
                "at least one browser identity is required".to_string(),
            ));
        }
        Ok(())
    }
}
