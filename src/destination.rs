//! Follows the primary CTA link and scores the lead-capture form on the
//! page it leads to. Best effort: every failure yields the default report.

use crate::config::Thresholds;
use crate::crawlers::renderer::Renderer;
use crate::error::Result;
use crate::filter::{self, HrefTarget};
use crate::forms;
use crate::parsers::{self, html};
use crate::results::Record;
use url::Url;

/// What the CTA destination looks like
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationReport {
    pub leads_to_separate_page: bool,
    pub has_form: bool,
    pub form_count: usize,
    pub form_field_count: usize,
    pub is_external: bool,
    pub url: String,
}

impl DestinationReport {
    /// Writes the report into a feature record under the `cta_` prefix
    pub fn write_into(&self, record: &mut Record) {
        record.insert("cta_leads_to_separate_page", self.leads_to_separate_page);
        record.insert("cta_destination_has_form", self.has_form);
        record.insert("cta_destination_form_count", self.form_count);
        record.insert("cta_destination_form_field_count", self.form_field_count);
        record.insert("cta_destination_is_external", self.is_external);
        record.insert("cta_destination_url", self.url.as_str());
    }
}

/// Resolves the CTA href against the page URL; `None` when it is not worth following
pub fn destination_url(href: &str, page_url: &str) -> Option<Url> {
    let base = Url::parse(page_url).ok()?;
    match filter::classify_href(href, &base) {
        HrefTarget::Page(url) => Some(url),
        HrefTarget::SamePage | HrefTarget::NotFollowable => None,
    }
}

/// Loads the CTA destination and scores its forms
pub async fn follow(
    renderer: &dyn Renderer,
    href: &str,
    page_url: &str,
    thresholds: &Thresholds,
) -> DestinationReport {
    let Some(target) = destination_url(href, page_url) else {
        ::log::debug!("CTA href '{}' on {} is not followable", href, page_url);
        return DestinationReport::default();
    };

    let snapshot = match renderer.render(target.as_str()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            ::log::warn!("Failed to load CTA destination {}: {}", target, e);
            return DestinationReport::default();
        }
    };

    match analyze_destination(&snapshot.html, &target, page_url, thresholds) {
        Ok(report) => report,
        Err(e) => {
            ::log::warn!("Failed to analyze CTA destination {}: {}", target, e);
            DestinationReport::default()
        }
    }
}

/// Scores the forms of an already loaded destination page
pub fn analyze_destination(
    markup: &str,
    target: &Url,
    page_url: &str,
    thresholds: &Thresholds,
) -> Result<DestinationReport> {
    let doc = parsers::parse_document(markup);
    let forms_found = html::select_all(&doc, "form")?;
    let assessed = forms::assess_forms(&forms_found, thresholds)?;
    let best = forms::best_form(&assessed);

    let is_external = Url::parse(page_url)
        .map(|base| filter::is_external(target, &base))
        .unwrap_or(false);

    Ok(DestinationReport {
        leads_to_separate_page: true,
        has_form: !forms_found.is_empty(),
        form_count: forms_found.len(),
        form_field_count: best.map(|f| f.field_count).unwrap_or(0),
        is_external,
        url: target.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::renderer::PageSnapshot;
    use crate::error::ExtractError;
    use async_trait::async_trait;

    struct OnePage {
        url: &'static str,
        html: &'static str,
    }

    #[async_trait]
    impl Renderer for OnePage {
        async fn render(&self, url: &str) -> Result<PageSnapshot> {
            if url == self.url {
                Ok(PageSnapshot::from_html(url, self.html))
            } else {
                Err(ExtractError::Timeout {
                    url: url.to_string(),
                    secs: 30,
                })
            }
        }
    }

    const SIGNUP: &str = r#"<body>
        <form action="/search"><input type="search" name="q"></form>
        <form><input name="name"><input type="email" name="email"><input name="company"><button>Start trial</button></form>
    </body>"#;

    #[tokio::test]
    async fn test_follow_scores_destination_forms() {
        let renderer = OnePage {
            url: "https://example.com/signup",
            html: SIGNUP,
        };
        let report = follow(&renderer, "/signup", "https://example.com/", &Thresholds::default()).await;
        assert!(report.leads_to_separate_page);
        assert!(report.has_form);
        assert_eq!(report.form_count, 2);
        assert_eq!(report.form_field_count, 3);
        assert!(!report.is_external);
        assert_eq!(report.url, "https://example.com/signup");
    }

    #[tokio::test]
    async fn test_rejected_hrefs_return_defaults() {
        let renderer = OnePage {
            url: "https://example.com/signup",
            html: SIGNUP,
        };
        for href in ["", "#", "#pricing", "javascript:void(0)", "mailto:x@y.z", "tel:123"] {
            let report = follow(&renderer, href, "https://example.com/", &Thresholds::default()).await;
            assert_eq!(report, DestinationReport::default(), "{href}");
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_defaults() {
        let renderer = OnePage {
            url: "https://example.com/signup",
            html: SIGNUP,
        };
        let report = follow(&renderer, "/elsewhere", "https://example.com/", &Thresholds::default()).await;
        assert_eq!(report, DestinationReport::default());
    }

    #[test]
    fn test_external_destination() {
        let target = Url::parse("https://app.other.io/register").unwrap();
        let report = analyze_destination("<p>No forms</p>", &target, "https://example.com/", &Thresholds::default()).unwrap();
        assert!(report.is_external);
        assert!(!report.has_form);
        assert_eq!(report.form_field_count, 0);
    }

    #[test]
    fn test_write_into_uses_prefixed_keys() {
        let mut record = Record::new("https://example.com/");
        DestinationReport::default().write_into(&mut record);
        assert_eq!(record.number("cta_destination_form_count"), 0.0);
        assert!(record.contains("cta_leads_to_separate_page"));
        assert!(record.contains("cta_destination_url"));
    }
}
