mod registry_tests;

use crate::config::ExtractorConfig;
use crate::crawlers::renderer::{PageSnapshot, Renderer};
use crate::error::{ExtractError, Result};
use crate::pipeline;
use crate::results::Record;
use async_trait::async_trait;
use std::collections::HashMap;

/// Serves fixed markup per URL; unknown URLs fail like a dead host
pub(crate) struct StaticSite {
    pages: HashMap<String, String>,
}

impl StaticSite {
    pub(crate) fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl Renderer for StaticSite {
    async fn render(&self, url: &str) -> Result<PageSnapshot> {
        self.pages
            .get(url)
            .map(|html| PageSnapshot::from_html(url, html))
            .ok_or_else(|| ExtractError::WebDriver(format!("net::ERR_NAME_NOT_RESOLVED at {url}")))
    }
}

/// DOM features of static markup, without destination or ratios
pub(crate) fn extract(url: &str, html: &str) -> Record {
    let snapshot = PageSnapshot::from_html(url, html);
    pipeline::extract_snapshot(&snapshot, &ExtractorConfig::default()).record
}
