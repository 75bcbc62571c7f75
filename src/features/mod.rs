//! Feature registry.
//!
//! Every feature is a named, pure function of a [`FeatureContext`]. The
//! registry evaluates them one by one; a detector that errors or panics only
//! loses its own value, which falls back to the typed default.

pub mod copy;
pub mod cta;
pub mod forms;
pub mod integrity;
pub mod layout;
pub mod media;
pub mod offers;
pub mod ratios;
pub mod structure;
pub mod trust;

#[cfg(test)]
mod tests;

use crate::config::Thresholds;
use crate::cta::{PrimaryCta, detect_primary_cta};
use crate::error::Result;
use crate::layout::LayoutMap;
use crate::locators;
use crate::parsers::html::{self, Region};
use crate::parsers::text::truncate_chars;
use crate::results::{FeatureValue, Record};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use url::Url;

/// Text features are cut to this many characters
pub const TEXT_FEATURE_CHARS: usize = 100;

/// Everything a detector may look at for one page
pub struct FeatureContext<'a> {
    pub doc: &'a Html,
    pub page_url: Option<Url>,
    pub hero: Region<'a>,
    pub main: Region<'a>,
    pub section_count: usize,
    pub cta: PrimaryCta,
    /// Visible body text, whitespace-collapsed
    pub body_text: String,
    pub body_lower: String,
    pub layout: &'a LayoutMap,
    pub thresholds: &'a Thresholds,
}

impl<'a> FeatureContext<'a> {
    /// Runs the structural locators and the CTA detector for a parsed page
    pub fn new(doc: &'a Html, page_url: &str, layout: &'a LayoutMap, thresholds: &'a Thresholds) -> Self {
        let hero = locators::locate_hero(doc);
        let main = locators::locate_main_content(doc);
        let section_count = locators::count_sections(doc, thresholds);
        let cta = detect_primary_cta(doc, &hero, thresholds).unwrap_or_else(|e| {
            ::log::warn!("Primary CTA detection failed on {}: {}", page_url, e);
            PrimaryCta::default()
        });
        let body_text = html::body_text(doc);
        let body_lower = body_text.to_lowercase();

        Self {
            doc,
            page_url: Url::parse(page_url).ok(),
            hero,
            main,
            section_count,
            cta,
            body_text,
            body_lower,
            layout,
            thresholds,
        }
    }
}

/// How a feature is computed and what its value type is
#[derive(Clone, Copy)]
pub enum Detector {
    Flag(fn(&FeatureContext<'_>) -> Result<bool>),
    Count(fn(&FeatureContext<'_>) -> Result<usize>),
    Real(fn(&FeatureContext<'_>) -> Result<f64>),
    Text(fn(&FeatureContext<'_>) -> Result<String>),
    /// Emitted only when the detector finds something
    Optional(fn(&FeatureContext<'_>) -> Result<Option<f64>>),
}

impl Detector {
    fn evaluate(&self, ctx: &FeatureContext<'_>) -> Result<Option<FeatureValue>> {
        Ok(match self {
            Detector::Flag(f) => Some(FeatureValue::flag(f(ctx)?)),
            Detector::Count(f) => Some(f(ctx)?.into()),
            Detector::Real(f) => Some(f(ctx)?.into()),
            Detector::Text(f) => Some(truncate_chars(&f(ctx)?, TEXT_FEATURE_CHARS).into()),
            Detector::Optional(f) => f(ctx)?.map(FeatureValue::from),
        })
    }

    /// Value used when the detector fails
    fn fallback(&self) -> Option<FeatureValue> {
        match self {
            Detector::Flag(_) | Detector::Count(_) => Some(FeatureValue::Int(0)),
            Detector::Real(_) => Some(FeatureValue::Float(0.0)),
            Detector::Text(_) => Some(FeatureValue::Text(String::new())),
            Detector::Optional(_) => None,
        }
    }
}

/// A named feature
#[derive(Clone, Copy)]
pub struct Feature {
    pub name: &'static str,
    pub detector: Detector,
}

const FAMILIES: [(&str, &[Feature]); 9] = [
    ("structure", structure::FEATURES),
    ("copy", copy::FEATURES),
    ("cta", cta::FEATURES),
    ("forms", forms::FEATURES),
    ("trust", trust::FEATURES),
    ("offers", offers::FEATURES),
    ("media", media::FEATURES),
    ("layout", layout::FEATURES),
    ("integrity", integrity::FEATURES),
];

/// Every registered feature, family by family
pub fn registry() -> impl Iterator<Item = &'static Feature> {
    FAMILIES.iter().flat_map(|(_, features)| features.iter())
}

/// Evaluates one feature in isolation
pub fn evaluate(feature: &Feature, ctx: &FeatureContext<'_>) -> Option<FeatureValue> {
    match catch_unwind(AssertUnwindSafe(|| feature.detector.evaluate(ctx))) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            ::log::warn!("Feature {} failed: {}", feature.name, e);
            feature.detector.fallback()
        }
        Err(_) => {
            ::log::warn!("Feature {} panicked", feature.name);
            feature.detector.fallback()
        }
    }
}

/// Evaluates every registered feature into `record`
pub fn extract_into(ctx: &FeatureContext<'_>, record: &mut Record) {
    for feature in registry() {
        if let Some(value) = evaluate(feature, ctx) {
            record.insert(feature.name, value);
        }
    }
}

// =============================================================================
// Helpers shared by the detector families
// =============================================================================

/// Elements whose class or id matches `marker`
pub(crate) fn marked<'a>(doc: &'a Html, marker: &Regex) -> Result<Vec<ElementRef<'a>>> {
    Ok(html::select_all(doc, "[class], [id]")?
        .into_iter()
        .filter(|el| !matches!(html::tag(*el), "html" | "body"))
        .filter(|el| marker.is_match(&html::class_and_id(*el)))
        .collect())
}

/// Drops every element that has another element of the set below it
pub(crate) fn innermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let ancestors: HashSet<_> = elements
        .iter()
        .flat_map(|el| html::ancestor_elements(*el).map(|a| a.id()))
        .collect();
    elements
        .into_iter()
        .filter(|el| !ancestors.contains(&el.id()))
        .collect()
}

/// Lowercase text of every h1-h4, one heading per line
pub(crate) fn heading_text(doc: &Html) -> Result<String> {
    Ok(html::select_all(doc, "h1, h2, h3, h4")?
        .into_iter()
        .map(|h| html::element_text(h).to_lowercase())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Lowercase `alt`, `src` and class of every image, one image per line
pub(crate) fn image_hints(doc: &Html) -> Result<String> {
    Ok(html::select_all(doc, "img")?
        .into_iter()
        .map(|img| {
            format!(
                "{} {} {}",
                html::attr_lower(img, "alt"),
                html::attr_lower(img, "src"),
                html::class_and_id(img)
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Whether a JSON-LD block declares the schema.org type `schema_type`
pub(crate) fn declares_schema_type(doc: &Html, schema_type: &str) -> Result<bool> {
    let quoted = format!("\"{schema_type}\"");
    Ok(html::select_all(doc, "script[type='application/ld+json']")?
        .into_iter()
        .any(|script| script.text().collect::<String>().contains(&quoted)))
}

/// Lowercase `href` of every link
pub(crate) fn link_hrefs(doc: &Html) -> Result<Vec<String>> {
    Ok(html::select_all(doc, "a[href]")?
        .into_iter()
        .map(|a| html::attr_lower(a, "href"))
        .collect())
}
