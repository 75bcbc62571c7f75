//! Primary call-to-action detection.
//!
//! Every button-like element is filtered, then scored by adding up the
//! signals in [`score_candidate`]. The first candidate reaching the highest
//! total wins; later candidates with an equal score do not replace it.

use crate::config::Thresholds;
use crate::error::Result;
use crate::parsers::html::{self, Region};
use crate::parsers::text::{normalize_whitespace, truncate_chars};
use crate::patterns;
use scraper::{ElementRef, Html};

/// Elements that can act as a call to action, in document order
pub const BUTTON_LIKE_SELECTOR: &str = "button, input[type='submit'], input[type='button'], \
     a[role='button'], a[class*='btn'], a[class*='Btn'], a[class*='button'], \
     a[class*='Button'], a[class*='cta'], a[class*='CTA']";

/// A button-like element that passed the exclusion filter
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: ElementRef<'a>,
    /// Index among all button-like elements, matching the layout measurement order
    pub position: usize,
    /// Whitespace-normalized text in its original case
    pub display_text: String,
    pub text: String,
    pub class: String,
    pub href: String,
}

/// The winning call to action.
///
/// `score == 0` with empty `text` means no candidate qualified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryCta {
    pub text: String,
    pub score: i64,
    pub tag: String,
    pub class: String,
    pub href: String,
    /// Index among all button-like elements on the page
    pub position: Option<usize>,
}

impl PrimaryCta {
    pub fn is_found(&self) -> bool {
        !(self.score == 0 && self.text.is_empty())
    }

    /// Re-resolves the winning element in `doc`
    pub fn element<'a>(&self, doc: &'a Html) -> Result<Option<ElementRef<'a>>> {
        let Some(position) = self.position else {
            return Ok(None);
        };
        Ok(html::select_all(doc, BUTTON_LIKE_SELECTOR)?.get(position).copied())
    }
}

/// Score of one candidate with the signals that contributed to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CtaScore {
    pub total: i64,
    pub signals: Vec<(&'static str, i64)>,
}

impl CtaScore {
    fn add(&mut self, signal: &'static str, points: i64) {
        self.total += points;
        self.signals.push((signal, points));
    }
}

/// Button-like elements that survive the exclusion filter, in document order
pub fn candidates<'a>(doc: &'a Html, thresholds: &Thresholds) -> Result<Vec<Candidate<'a>>> {
    let mut found = Vec::new();
    for (position, element) in html::select_all(doc, BUTTON_LIKE_SELECTOR)?
        .into_iter()
        .enumerate()
    {
        let display_text = candidate_text(element);
        let text = display_text.to_lowercase();
        let class = html::attr_lower(element, "class");
        if is_excluded(element, &text, &class, thresholds) {
            continue;
        }
        found.push(Candidate {
            element,
            position,
            display_text,
            text,
            class,
            href: html::attr_lower(element, "href").trim().to_string(),
        });
    }
    Ok(found)
}

fn candidate_text(element: ElementRef<'_>) -> String {
    let text = if html::tag(element) == "input" {
        normalize_whitespace(element.value().attr("value").unwrap_or_default())
    } else {
        html::element_text(element)
    };
    if !text.is_empty() {
        return text;
    }
    ["aria-label", "title"]
        .iter()
        .find_map(|attr| element.value().attr(attr))
        .map(normalize_whitespace)
        .unwrap_or_default()
}

fn is_excluded(element: ElementRef<'_>, text: &str, class: &str, thresholds: &Thresholds) -> bool {
    if patterns::CTA_EXCLUDED.is_match(text) || patterns::CTA_EXCLUDED.is_match(class) {
        return true;
    }
    let len = text.chars().count();
    if len < thresholds.cta_min_text_chars || len > thresholds.cta_max_text_chars {
        return true;
    }
    let style: String = html::attr_lower(element, "style")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    style.contains("display:none")
}

/// Adds up every signal that applies to `candidate`
pub fn score_candidate(candidate: &Candidate<'_>, order: usize, hero: &Region<'_>) -> CtaScore {
    let mut score = CtaScore::default();
    let element = candidate.element;
    let class = candidate.class.as_str();
    let text = candidate.text.as_str();
    let href = candidate.href.as_str();

    // placement
    if hero.contains(element) {
        score.add("in_hero", 30);
    }
    if in_above_fold_container(element) {
        score.add("above_fold_container", 20);
    }
    if order < 3 {
        score.add("early_in_page", 10);
    }

    // styling
    if patterns::CTA_PRIMARY_CLASS.is_match(class) {
        score.add("primary_class", 25);
    }
    if patterns::CTA_ACCENT_CLASS.is_match(class) {
        score.add("accent_class", 15);
    }
    if patterns::CTA_LARGE_CLASS.is_match(class) {
        score.add("large_class", 10);
    }
    if patterns::CTA_SOLID_CLASS.is_match(class) && !patterns::CTA_OUTLINE_CLASS.is_match(class) {
        score.add("solid_class", 8);
    }
    if in_cta_section(element) {
        score.add("cta_section", 10);
    }

    // wording
    if patterns::CTA_ACTION_VERB.is_match(text) {
        score.add("action_verb", 15);
    }
    if patterns::CTA_TRIAL_DEMO.is_match(text) {
        score.add("trial_or_demo", 12);
    }
    if patterns::CTA_CONTACT.is_match(text) {
        score.add("contact_or_schedule", 10);
    }
    if patterns::CTA_EXPLORE.is_match(text) {
        score.add("exploratory", 8);
    }
    if patterns::CTA_URGENCY_WORD.is_match(text) {
        score.add("urgency_word", 5);
    }

    // element kind
    match html::tag(element) {
        "button" | "input" => score.add("real_button", 5),
        "a" => score.add("styled_link", 3),
        _ => {}
    }

    // destination
    if patterns::CTA_HREF_CONVERSION.is_match(href) {
        score.add("conversion_href", 10);
    }
    if patterns::CTA_HREF_APP.is_match(href) {
        score.add("app_href", 8);
    }

    if is_sole_cta_in_parent(element) {
        score.add("sole_in_parent", 5);
    }

    score
}

fn in_above_fold_container(element: ElementRef<'_>) -> bool {
    html::ancestor_elements(element)
        .filter(|a| !matches!(html::tag(*a), "html" | "body"))
        .any(|a| html::tag(a) == "header" || patterns::ABOVE_FOLD_CONTAINER.is_match(&html::class_and_id(a)))
}

fn in_cta_section(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(html::ancestor_elements(element).take(3))
        .filter(|a| !matches!(html::tag(*a), "html" | "body"))
        .any(|a| patterns::CTA_SECTION_CLASS.is_match(&html::class_and_id(a)))
}

fn is_sole_cta_in_parent(element: ElementRef<'_>) -> bool {
    html::parent_element(element)
        .and_then(|parent| html::select_within(parent, BUTTON_LIKE_SELECTOR).ok())
        .is_some_and(|siblings| siblings.len() == 1)
}

/// Picks the highest-scoring candidate; the empty sentinel when none qualifies
pub fn detect_primary_cta(doc: &Html, hero: &Region<'_>, thresholds: &Thresholds) -> Result<PrimaryCta> {
    let candidates = candidates(doc, thresholds)?;
    let mut best: Option<(&Candidate<'_>, CtaScore)> = None;

    for (order, candidate) in candidates.iter().enumerate() {
        let score = score_candidate(candidate, order, hero);
        let beats = best
            .as_ref()
            .is_none_or(|(_, current)| score.total > current.total);
        if beats {
            best = Some((candidate, score));
        }
    }

    let Some((winner, score)) = best else {
        ::log::debug!("No primary CTA candidate survived filtering");
        return Ok(PrimaryCta::default());
    };
    ::log::debug!(
        "Primary CTA '{}' scored {} from {:?}",
        winner.display_text,
        score.total,
        score.signals
    );

    Ok(PrimaryCta {
        text: truncate_chars(&winner.display_text, thresholds.cta_result_text_chars),
        score: score.total,
        tag: html::tag(winner.element).to_string(),
        class: winner.element.value().attr("class").unwrap_or_default().to_string(),
        href: winner.element.value().attr("href").unwrap_or_default().to_string(),
        position: Some(winner.position),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locators::locate_hero;

    fn detect(markup: &str) -> PrimaryCta {
        let doc = Html::parse_document(markup);
        let hero = locate_hero(&doc);
        detect_primary_cta(&doc, &hero, &Thresholds::default()).unwrap()
    }

    #[test]
    fn test_single_hero_trial_button() {
        let cta = detect(
            r#"<body><div class="hero"><button class="btn-primary">Start Free Trial</button></div></body>"#,
        );
        assert_eq!(cta.text, "Start Free Trial");
        assert_eq!(cta.tag, "button");
        assert_eq!(cta.class, "btn-primary");
        assert!(cta.score >= 30 + 25 + 15 + 12 + 5);
        assert!(cta.is_found());
    }

    #[test]
    fn test_only_utility_controls_yield_sentinel() {
        let cta = detect(
            "<body><button>Close</button><button>Menu</button><button>Accept Cookies</button></body>",
        );
        assert_eq!(cta, PrimaryCta::default());
        assert!(!cta.is_found());
    }

    #[test]
    fn test_utility_terms_inside_words_are_excluded() {
        for markup in [
            "<body><button>Get the playbook</button></body>",
            "<body><button>Backup now</button></body>",
            "<body><a class='feedback-btn' href='/feedback'>Tell us</a></body>",
            "<body><a class='searchbar-btn' href='/find'>Find a plan</a></body>",
        ] {
            assert!(!detect(markup).is_found(), "{markup}");
        }
    }

    #[test]
    fn test_text_length_and_hidden_filters() {
        let long = "x".repeat(101);
        let markup = format!(
            "<body><button>X</button><button>{long}</button><button style='display: none'>Buy now</button></body>"
        );
        assert!(!detect(&markup).is_found());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let cta = detect(
            "<body><p><button>Alpha offer</button></p><p><button>Omega offer</button></p></body>",
        );
        assert_eq!(cta.text, "Alpha offer");
    }

    #[test]
    fn test_moving_winner_into_hero_keeps_it_winning() {
        let outside = "<body><div><a class='btn' href='/pricing'>Get started</a></div>\
                       <div><a class='btn' href='/about'>About us</a></div></body>";
        let inside = "<body><div class='hero'><a class='btn' href='/pricing'>Get started</a></div>\
                      <div><a class='btn' href='/about'>About us</a></div></body>";
        let before = detect(outside);
        let after = detect(inside);
        assert_eq!(before.text, "Get started");
        assert_eq!(after.text, "Get started");
        assert!(after.score >= before.score);
    }

    #[test]
    fn test_link_button_signals() {
        let doc = Html::parse_document(
            "<body><section><a class='btn btn-lg' href='https://app.example.com/signup'>Join today</a></section></body>",
        );
        let hero = Region::empty();
        let found = candidates(&doc, &Thresholds::default()).unwrap();
        let score = score_candidate(&found[0], 0, &hero);
        let names: Vec<_> = score.signals.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"large_class"));
        assert!(names.contains(&"action_verb"));
        assert!(names.contains(&"urgency_word"));
        assert!(names.contains(&"styled_link"));
        assert!(names.contains(&"conversion_href"));
        assert!(names.contains(&"app_href"));
        assert!(names.contains(&"sole_in_parent"));
        assert!(!names.contains(&"in_hero"));
    }

    #[test]
    fn test_input_value_is_candidate_text() {
        let cta = detect("<body><form><input type='submit' value='Download the guide'></form></body>");
        assert_eq!(cta.text, "Download the guide");
        assert_eq!(cta.tag, "input");
    }

    #[test]
    fn test_result_text_is_truncated() {
        let text = format!("Get {}", "a".repeat(80));
        let cta = detect(&format!("<body><button>{text}</button></body>"));
        assert_eq!(cta.text.chars().count(), 50);
    }

    #[test]
    fn test_element_round_trip_by_position() {
        let markup = "<body><button>Close</button><a class='btn' href='/demo'>Book a demo</a></body>";
        let doc = Html::parse_document(markup);
        let cta = detect_primary_cta(&doc, &Region::empty(), &Thresholds::default()).unwrap();
        assert_eq!(cta.position, Some(1));
        let el = cta.element(&doc).unwrap().unwrap();
        assert_eq!(html::element_text(el), "Book a demo");
    }
}
