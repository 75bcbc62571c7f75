use crate::config::{BrowserIdentity, ExtractorConfig};
use crate::crawlers::renderer::{PageSnapshot, Renderer};
use crate::error::{ExtractError, Result};
use crate::layout::{self, LayoutMap};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use tokio::time::{Duration, timeout};

/// Alternative endpoints tried when the configured WebDriver is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444",
];

/// Renders pages in Chrome through a WebDriver server.
///
/// Every render opens its own session so pages never share cookies or
/// storage, and each session gets a randomly picked browser identity.
pub struct WebDriverRenderer {
    webdriver_url: String,
    identities: Vec<BrowserIdentity>,
    headless: bool,
    navigation_timeout_secs: u64,
    settle_delay: Duration,
}

impl WebDriverRenderer {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            identities: config.identities.clone(),
            headless: config.headless,
            navigation_timeout_secs: config.navigation_timeout_secs,
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }

    /// Opens and closes one session; fails when no WebDriver answers
    pub async fn check_connection(&self) -> Result<()> {
        let identity = self.pick_identity();
        let client = self.connect(&identity).await?;
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close connection check session: {}", e);
        }
        Ok(())
    }

    fn pick_identity(&self) -> BrowserIdentity {
        self.identities
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| BrowserIdentity {
                user_agent: String::new(),
                width: 1920,
                height: 1080,
            })
    }

    fn capabilities(&self, identity: &BrowserIdentity) -> serde_json::Map<String, Value> {
        let mut args = vec![
            format!("--window-size={},{}", identity.width, identity.height),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];
        if !identity.user_agent.is_empty() {
            args.push(format!("--user-agent={}", identity.user_agent));
        }
        if self.headless {
            args.push("--headless=new".to_string());
        }

        let mut caps = serde_json::Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    /// Connects to the configured WebDriver, then to the usual local fallbacks
    async fn connect(&self, identity: &BrowserIdentity) -> Result<Client> {
        let caps = self.capabilities(identity);
        let first_error = match ClientBuilder::native()
            .capabilities(caps.clone())
            .connect(&self.webdriver_url)
            .await
        {
            Ok(client) => {
                ::log::trace!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => e,
        };
        ::log::warn!(
            "Failed to connect to WebDriver at {}: {}",
            self.webdriver_url,
            first_error
        );

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == self.webdriver_url {
                continue;
            }
            if let Ok(client) = ClientBuilder::native()
                .capabilities(caps.clone())
                .connect(url)
                .await
            {
                ::log::info!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(first_error.into())
    }

    async fn capture(&self, client: &Client, url: &str) -> Result<PageSnapshot> {
        let started = std::time::Instant::now();

        match timeout(
            Duration::from_secs(self.navigation_timeout_secs),
            client.goto(url),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(handle_navigation_error(e, "accessing", url)),
            Err(_) => {
                return Err(ExtractError::Timeout {
                    url: url.to_string(),
                    secs: self.navigation_timeout_secs,
                });
            }
        }

        // let late scripts and lazy content settle
        tokio::time::sleep(self.settle_delay).await;

        let html = client
            .source()
            .await
            .map_err(|e| handle_navigation_error(e, "getting source for", url))?;

        let final_url = match client.current_url().await {
            Ok(current) => current.to_string(),
            Err(e) => {
                ::log::debug!("Could not read final URL of {}: {}", url, e);
                url.to_string()
            }
        };

        let layout = match client
            .execute(layout::MEASURE_SCRIPT, vec![layout::measure_arguments()])
            .await
        {
            Ok(value) => LayoutMap::from_measurements(value).unwrap_or_else(|e| {
                ::log::warn!("Unexpected layout measurement result on {}: {}", url, e);
                LayoutMap::default()
            }),
            Err(e) => {
                ::log::warn!("Layout measurement failed on {}: {}", url, e);
                LayoutMap::default()
            }
        };

        ::log::debug!(
            "Rendered {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );

        Ok(PageSnapshot {
            requested_url: url.to_string(),
            final_url,
            html,
            layout,
        })
    }
}

#[async_trait]
impl Renderer for WebDriverRenderer {
    async fn render(&self, url: &str) -> Result<PageSnapshot> {
        let identity = self.pick_identity();
        let client = self.connect(&identity).await?;
        let result = self.capture(&client, url).await;
        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close session for {}: {}", url, e);
        }
        result
    }
}

/// Maps a failed WebDriver command to the crate error, logging lost sessions
fn handle_navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> ExtractError {
    let message = error.to_string();
    if message.contains("Unable to find session") || message.contains("invalid session id") {
        ::log::warn!("Lost session while {} {}", context, url);
        ExtractError::Session(message)
    } else {
        ::log::warn!("Failed {} {}: {}", context, url, message);
        ExtractError::WebDriver(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_carry_identity() {
        let mut config = ExtractorConfig::default();
        config.headless = true;
        let renderer = WebDriverRenderer::new(&config);
        let identity = BrowserIdentity {
            user_agent: "TestAgent/1.0".to_string(),
            width: 1280,
            height: 720,
        };
        let caps = renderer.capabilities(&identity);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.contains(&json!("--window-size=1280,720")));
        assert!(args.contains(&json!("--user-agent=TestAgent/1.0")));
        assert!(args.contains(&json!("--headless=new")));
    }

    #[test]
    fn test_identity_comes_from_config() {
        let config = ExtractorConfig::default();
        let renderer = WebDriverRenderer::new(&config);
        for _ in 0..10 {
            assert!(config.identities.contains(&renderer.pick_identity()));
        }
    }
}
