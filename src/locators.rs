//! Structural locators: hero region, main content region and section count.
//!
//! Each locator is an ordered list of named strategies sharing one signature.
//! The hero and main-content cascades stop at the first strategy that yields a
//! region; the section count takes the maximum across strategies.

use crate::config::Thresholds;
use crate::cta::BUTTON_LIKE_SELECTOR;
use crate::error::Result;
use crate::parsers::html::{self, Region};
use crate::parsers::text::word_count;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// A locator strategy: `Ok(None)` means "no match, try the next one"
pub type Strategy = fn(&Html) -> Result<Option<Region<'_>>>;

const HERO_STRATEGIES: [(&str, Strategy); 4] = [
    ("hero_markers", hero_markers),
    ("first_section_with_heading", first_section_with_heading),
    ("heading_and_button_block", heading_and_button_block),
    ("first_h1_parent", first_h1_parent),
];

const MAIN_CONTENT_STRATEGIES: [(&str, Strategy); 3] = [
    ("semantic_main", semantic_main),
    ("content_class_names", content_class_names),
    ("longest_text_block", longest_text_block),
];

#[allow(clippy::expect_used)]
static CONTENT_AREA_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)main[-_]?content|page[-_]?content|site[-_]?content|content[-_]?area|entry[-_]?content|post[-_]?content|primary[-_]?content|\bcontent\b|\bmain\b",
    )
    .expect("CONTENT_AREA_CLASS regex")
});

/// Locates the hero region; an empty region when nothing matches
pub fn locate_hero(doc: &Html) -> Region<'_> {
    run_cascade("hero", &HERO_STRATEGIES, doc).unwrap_or_else(Region::empty)
}

/// Locates the main content region; falls back to the body
pub fn locate_main_content(doc: &Html) -> Region<'_> {
    run_cascade("main content", &MAIN_CONTENT_STRATEGIES, doc)
        .unwrap_or_else(|| Region::single(html::body(doc)))
}

fn run_cascade<'a>(locator: &str, strategies: &[(&str, Strategy)], doc: &'a Html) -> Option<Region<'a>> {
    for (name, strategy) in strategies {
        match strategy(doc) {
            Ok(Some(region)) => {
                ::log::debug!("{} located by strategy {}", locator, name);
                return Some(region);
            }
            Ok(None) => {}
            Err(e) => ::log::warn!("{} strategy {} failed: {}", locator, name, e),
        }
    }
    ::log::debug!("{} not located by any strategy", locator);
    None
}

/// Elements whose class or id mentions "hero"; first in document order wins
pub fn hero_markers(doc: &Html) -> Result<Option<Region<'_>>> {
    let found = html::select_all(doc, "[class], [id]")?
        .into_iter()
        .filter(|el| !matches!(html::tag(*el), "html" | "body"))
        .find(|el| html::class_and_id(*el).contains("hero"));
    Ok(found.map(Region::single))
}

/// The first `<section>`, provided it carries an h1 or h2
pub fn first_section_with_heading(doc: &Html) -> Result<Option<Region<'_>>> {
    match html::select_first(doc, "section")? {
        Some(section) if html::has_within(section, "h1, h2")? => Ok(Some(Region::single(section))),
        _ => Ok(None),
    }
}

/// First header/section/div holding both a main heading and a button-like element
pub fn heading_and_button_block(doc: &Html) -> Result<Option<Region<'_>>> {
    for el in html::select_all(doc, "header, section, div")? {
        if html::has_within(el, "h1, h2")? && html::has_within(el, BUTTON_LIKE_SELECTOR)? {
            return Ok(Some(Region::single(el)));
        }
    }
    Ok(None)
}

/// Parent of the first h1
pub fn first_h1_parent(doc: &Html) -> Result<Option<Region<'_>>> {
    let parent = html::select_first(doc, "h1")?.and_then(html::parent_element);
    Ok(parent.map(Region::single))
}

/// All semantic main/article elements combined
pub fn semantic_main(doc: &Html) -> Result<Option<Region<'_>>> {
    let found = html::select_all(doc, "main, article, [role='main']")?;
    Ok((!found.is_empty()).then(|| Region::from_elements(found)))
}

/// All elements named like a content area
pub fn content_class_names(doc: &Html) -> Result<Option<Region<'_>>> {
    let found: Vec<_> = html::select_all(doc, "[class], [id]")?
        .into_iter()
        .filter(|el| !matches!(html::tag(*el), "html" | "body"))
        .filter(|el| CONTENT_AREA_CLASS.is_match(&html::class_and_id(*el)))
        .collect();
    Ok((!found.is_empty()).then(|| Region::from_elements(found)))
}

/// The section/article/container-like element with the most text
pub fn longest_text_block(doc: &Html) -> Result<Option<Region<'_>>> {
    let mut best = None;
    let mut best_len = 0;
    for el in html::select_all(
        doc,
        "section, article, [class*='container'], [class*='wrapper'], [class*='layout']",
    )? {
        let len = html::element_text(el).chars().count();
        if len > best_len {
            best_len = len;
            best = Some(el);
        }
    }
    Ok(best.map(Region::single))
}

/// Counts logical page sections as the max of three conventions
pub fn count_sections(doc: &Html, thresholds: &Thresholds) -> usize {
    let semantic = section_tags(doc).unwrap_or_else(|e| {
        ::log::warn!("section tag count failed: {}", e);
        0
    });
    let named = section_class_names(doc).unwrap_or_else(|e| {
        ::log::warn!("section class count failed: {}", e);
        0
    });
    let blocks = content_divs(doc, thresholds).unwrap_or_else(|e| {
        ::log::warn!("section div count failed: {}", e);
        0
    });
    semantic.max(named).max(blocks.min(thresholds.section_div_cap))
}

fn section_tags(doc: &Html) -> Result<usize> {
    html::count(doc, "section")
}

fn section_class_names(doc: &Html) -> Result<usize> {
    Ok(html::select_all(doc, "[class], [id]")?
        .into_iter()
        .filter(|el| html::class_and_id(*el).contains("section"))
        .count())
}

/// Divs with an h1-h3, enough words and enough child elements
fn content_divs(doc: &Html, thresholds: &Thresholds) -> Result<usize> {
    let mut count = 0;
    for div in html::select_all(doc, "div")? {
        if !html::has_within(div, "h1, h2, h3")? {
            continue;
        }
        if html::child_elements(div).count() <= thresholds.section_div_min_children {
            continue;
        }
        if word_count(&html::element_text(div)) > thresholds.section_div_min_words {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_text(markup: &str) -> String {
        let doc = Html::parse_document(markup);
        locate_hero(&doc).text()
    }

    #[test]
    fn test_hero_prefers_markers_over_sections() {
        let text = hero_text(
            "<body><section><h1>Section</h1></section><div id='hero'>Marked</div></body>",
        );
        assert_eq!(text, "Marked");
    }

    #[test]
    fn test_hero_first_section_needs_heading() {
        assert_eq!(
            hero_text("<body><section><h2>Welcome</h2></section><section><h1>Other</h1></section></body>"),
            "Welcome"
        );
        // the first section has no heading, so the cascade moves on
        let text = hero_text(
            "<body><section><p>Intro</p></section><header><h1>Title</h1><button>Go</button></header></body>",
        );
        assert_eq!(text, "Title Go");
    }

    #[test]
    fn test_hero_falls_back_to_h1_parent() {
        assert_eq!(
            hero_text("<body><p>x</p><span><h1>Only a heading</h1></span></body>"),
            "Only a heading"
        );
    }

    #[test]
    fn test_hero_on_blank_document_is_empty_and_safe() {
        let doc = Html::parse_document("");
        let hero = locate_hero(&doc);
        assert!(hero.is_empty());
        assert!(hero.select("button").unwrap().is_empty());
        assert!(!hero.has("img").unwrap());
    }

    #[test]
    fn test_main_content_combines_semantic_elements() {
        let doc = Html::parse_document(
            "<body><main><p>A</p></main><article><p>B</p></article><div>C</div></body>",
        );
        let main = locate_main_content(&doc);
        assert_eq!(main.elements().len(), 2);
        assert_eq!(main.text(), "A B");
    }

    #[test]
    fn test_main_content_ignores_nested_matches() {
        let doc = Html::parse_document(
            "<body><main><article><p>one two three four five</p></article></main></body>",
        );
        let main = locate_main_content(&doc);
        assert_eq!(main.elements().len(), 1);
        assert_eq!(word_count(&main.text()), 5);

        let doc = Html::parse_document(
            "<body><div class='main-content'><div class='content'><p>one two three four five</p></div></div></body>",
        );
        assert_eq!(word_count(&locate_main_content(&doc).text()), 5);
    }

    #[test]
    fn test_main_content_by_longest_block() {
        let doc = Html::parse_document(
            "<body><section>short</section><section>this one is much longer</section></body>",
        );
        assert_eq!(locate_main_content(&doc).text(), "this one is much longer");
    }

    #[test]
    fn test_main_content_falls_back_to_body() {
        let doc = Html::parse_document("<body><p>Just text</p></body>");
        let main = locate_main_content(&doc);
        assert_eq!(main.elements().len(), 1);
        assert_eq!(main.text(), "Just text");
    }

    #[test]
    fn test_section_count_takes_maximum() {
        let doc = Html::parse_document(
            "<body><section></section><div class='section-a'></div><div class='section-b'></div><div id='pricing-section'></div></body>",
        );
        assert_eq!(count_sections(&doc, &Thresholds::default()), 3);
    }

    #[test]
    fn test_section_count_caps_div_blocks() {
        let words = "word ".repeat(60);
        let block = format!("<div><h2>Title</h2><p>{words}</p><p>more</p><p>end</p></div>");
        let markup = format!("<body>{}</body>", block.repeat(30));
        let doc = Html::parse_document(&markup);
        assert_eq!(count_sections(&doc, &Thresholds::default()), 20);
    }
}
