use crate::error::Result;
use crate::layout::LayoutMap;
use async_trait::async_trait;

/// Everything the extractor needs from one rendered page
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// URL that was requested
    pub requested_url: String,
    /// URL after redirects
    pub final_url: String,
    /// Serialized live DOM
    pub html: String,
    /// Viewport height and element geometry, empty when not measured
    pub layout: LayoutMap,
}

impl PageSnapshot {
    /// Snapshot of static markup with no measured layout
    pub fn from_html(url: &str, html: &str) -> Self {
        Self {
            requested_url: url.to_string(),
            final_url: url.to_string(),
            html: html.to_string(),
            layout: LayoutMap::default(),
        }
    }
}

/// Loads a URL in a browser-like environment and returns its rendered state.
///
/// Each call works in its own isolated page; implementations may be shared
/// by many concurrent analyses.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<PageSnapshot>;
}
