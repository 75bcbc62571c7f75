//! Per-URL orchestration.
//!
//! Render, then extract every DOM feature synchronously, then follow the
//! primary CTA, then annotate the record and finally add the ratios.

use crate::config::ExtractorConfig;
use crate::crawlers::renderer::{PageSnapshot, Renderer};
use crate::destination::{self, DestinationReport};
use crate::error::Result;
use crate::features::{self, FeatureContext, ratios};
use crate::filter::InternalHosts;
use crate::input::InputRow;
use crate::parsers;
use crate::results::Record;
use url::Url;

/// DOM features of a page plus the CTA href the destination step needs
#[derive(Debug, Clone)]
pub struct PageFeatures {
    pub record: Record,
    pub cta_href: Option<String>,
}

/// Computes every DOM feature of a rendered page.
///
/// The parsed document lives only inside this call.
pub fn extract_snapshot(snapshot: &PageSnapshot, config: &ExtractorConfig) -> PageFeatures {
    let doc = parsers::parse_document(&snapshot.html);
    let ctx = FeatureContext::new(&doc, &snapshot.final_url, &snapshot.layout, &config.thresholds);

    let mut record = Record::new(&snapshot.requested_url);
    features::extract_into(&ctx, &mut record);

    let cta_href = ctx.cta.is_found().then(|| ctx.cta.href.clone());
    PageFeatures { record, cta_href }
}

/// Adds the per-row annotations: internal-page flag and input targets
pub fn annotate(record: &mut Record, row: &InputRow, internal_hosts: &InternalHosts) {
    let is_internal = Url::parse(&row.url)
        .map(|url| internal_hosts.contains(&url))
        .unwrap_or(false);
    record.insert("is_internal", is_internal);
    for (key, value) in &row.targets {
        record.insert(key, value.clone());
    }
}

/// Produces the full feature record for one input row
pub async fn analyze(
    renderer: &dyn Renderer,
    row: &InputRow,
    config: &ExtractorConfig,
    internal_hosts: &InternalHosts,
) -> Result<Record> {
    let snapshot = renderer.render(&row.url).await?;
    let PageFeatures { mut record, cta_href } = extract_snapshot(&snapshot, config);

    let report = match cta_href {
        Some(href) if config.follow_cta_destination => {
            destination::follow(renderer, &href, &snapshot.final_url, &config.thresholds).await
        }
        _ => DestinationReport::default(),
    };
    report.write_into(&mut record);

    annotate(&mut record, row, internal_hosts);
    ratios::apply(&mut record);

    ::log::debug!("Extracted {} features from {}", record.len(), row.url);
    Ok(record)
}
