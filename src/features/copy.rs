//! Headline, page copy and document metadata.

use super::{Detector::*, Feature, FeatureContext, marked};
use crate::error::Result;
use crate::parsers::html;
use crate::parsers::text::{average_sentence_length, word_count};
use crate::patterns;
use scraper::ElementRef;

pub const FEATURES: &[Feature] = &[
    Feature { name: "headline_text", detector: Text(headline_text) },
    Feature { name: "headline_word_count", detector: Count(headline_word_count) },
    Feature { name: "headline_char_count", detector: Count(headline_char_count) },
    Feature { name: "headline_has_number", detector: Flag(headline_has_number) },
    Feature { name: "headline_is_question", detector: Flag(headline_is_question) },
    Feature { name: "has_subheadline", detector: Flag(has_subheadline) },
    Feature { name: "title_length", detector: Count(title_length) },
    Feature { name: "has_meta_description", detector: Flag(has_meta_description) },
    Feature { name: "meta_description_length", detector: Count(meta_description_length) },
    Feature { name: "avg_sentence_length", detector: Real(avg_sentence_length) },
    Feature { name: "avg_paragraph_word_count", detector: Real(avg_paragraph_word_count) },
    Feature { name: "question_count", detector: Count(question_count) },
    Feature { name: "exclamation_count", detector: Count(exclamation_count) },
    Feature { name: "you_word_count", detector: Count(you_word_count) },
    Feature { name: "number_count", detector: Count(number_count) },
    Feature { name: "benefit_word_count", detector: Count(benefit_word_count) },
    Feature { name: "feature_word_count", detector: Count(feature_word_count) },
    Feature { name: "page_language", detector: Text(page_language) },
    Feature { name: "has_schema_markup", detector: Flag(has_schema_markup) },
    Feature { name: "has_open_graph", detector: Flag(has_open_graph) },
    Feature { name: "has_viewport_meta", detector: Flag(has_viewport_meta) },
];

/// First non-empty `h1`, else the first non-empty `h2`
fn headline_element<'a>(ctx: &FeatureContext<'a>) -> Result<Option<ElementRef<'a>>> {
    for css in ["h1", "h2"] {
        if let Some(h) = html::select_all(ctx.doc, css)?
            .into_iter()
            .find(|h| !html::element_text(*h).is_empty())
        {
            return Ok(Some(h));
        }
    }
    Ok(None)
}

fn headline(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(headline_element(ctx)?
        .map(html::element_text)
        .unwrap_or_default())
}

fn headline_text(ctx: &FeatureContext<'_>) -> Result<String> {
    headline(ctx)
}

fn headline_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(word_count(&headline(ctx)?))
}

fn headline_char_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(headline(ctx)?.chars().count())
}

fn headline_has_number(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(headline(ctx)?.chars().any(|c| c.is_ascii_digit()))
}

fn headline_is_question(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(headline(ctx)?.trim_end().ends_with(['?', '？']))
}

fn has_subheadline(ctx: &FeatureContext<'_>) -> Result<bool> {
    // a second heading level inside the hero
    if ctx.hero.has("h2, h3")? && ctx.hero.has("h1")? {
        return Ok(true);
    }

    // copy right after the headline
    if let Some(h) = headline_element(ctx)? {
        let next = h.next_siblings().filter_map(ElementRef::wrap).next();
        if let Some(next) = next {
            let tag = html::tag(next);
            if matches!(tag, "p" | "h2" | "h3" | "h4") && word_count(&html::element_text(next)) >= 3 {
                return Ok(true);
            }
        }
    }

    Ok(!marked(ctx.doc, &patterns::SUBHEADLINE_CLASS)?.is_empty())
}

fn title_length(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(html::select_first(ctx.doc, "title")?
        .map(|t| html::element_text(t).chars().count())
        .unwrap_or(0))
}

fn meta_description(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(html::select_first(ctx.doc, "meta[name='description'], meta[name='Description']")?
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_default())
}

fn has_meta_description(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(!meta_description(ctx)?.is_empty())
}

fn meta_description_length(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(meta_description(ctx)?.chars().count())
}

fn avg_sentence_length(ctx: &FeatureContext<'_>) -> Result<f64> {
    Ok(average_sentence_length(&ctx.main.text()))
}

fn avg_paragraph_word_count(ctx: &FeatureContext<'_>) -> Result<f64> {
    let counts: Vec<usize> = html::select_all(ctx.doc, "p")?
        .into_iter()
        .map(|p| word_count(&html::element_text(p)))
        .filter(|n| *n > 0)
        .collect();
    if counts.is_empty() {
        return Ok(0.0);
    }
    Ok(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
}

fn question_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(ctx.body_text.matches(['?', '¿']).count())
}

fn exclamation_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(ctx.body_text.matches(['!', '¡']).count())
}

fn you_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::SECOND_PERSON.find_iter(&ctx.body_lower).count())
}

fn number_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::NUMBER_TOKEN.find_iter(&ctx.body_text).count())
}

fn benefit_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::BENEFIT_WORDS.find_iter(&ctx.body_lower).count())
}

fn feature_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::FEATURE_WORDS.find_iter(&ctx.body_lower).count())
}

/// Primary language subtag of `<html lang>`, e.g. `de` for `de-AT`
fn page_language(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(html::select_first(ctx.doc, "html")?
        .map(|h| html::attr_lower(h, "lang"))
        .and_then(|lang| lang.split(['-', '_']).next().map(str::trim).map(str::to_string))
        .unwrap_or_default())
}

fn has_schema_markup(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "script[type='application/ld+json'], [itemscope], [itemtype]")? > 0)
}

fn has_open_graph(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "meta[property^='og:']")? > 0)
}

fn has_viewport_meta(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "meta[name='viewport']")? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::layout::LayoutMap;
    use scraper::Html;

    fn with_context<T>(markup: &str, f: impl FnOnce(&FeatureContext<'_>) -> T) -> T {
        let doc = Html::parse_document(markup);
        let layout = LayoutMap::default();
        let thresholds = Thresholds::default();
        let ctx = FeatureContext::new(&doc, "https://example.com/", &layout, &thresholds);
        f(&ctx)
    }

    #[test]
    fn test_headline_features() {
        let markup = r#"<html lang="de-AT"><head><title>Acme Analytics</title>
            <meta name="description" content="Dashboards for teams">
            <meta property="og:title" content="Acme"></head>
            <body><h1>Are 3 dashboards enough?</h1><p>See every metric your team cares about.</p></body></html>"#;
        with_context(markup, |ctx| {
            assert_eq!(headline_text(ctx).unwrap(), "Are 3 dashboards enough?");
            assert_eq!(headline_word_count(ctx).unwrap(), 4);
            assert!(headline_has_number(ctx).unwrap());
            assert!(headline_is_question(ctx).unwrap());
            assert!(has_subheadline(ctx).unwrap());
            assert_eq!(title_length(ctx).unwrap(), 14);
            assert_eq!(meta_description_length(ctx).unwrap(), 20);
            assert!(has_open_graph(ctx).unwrap());
            assert!(!has_viewport_meta(ctx).unwrap());
            assert_eq!(page_language(ctx).unwrap(), "de");
        });
    }

    #[test]
    fn test_copy_counts() {
        let markup = "<body><p>Save time! Do you want faster results? Your team will enjoy it.</p>\
                      <p>Includes analytics and an API for 2,500 users.</p></body>";
        with_context(markup, |ctx| {
            assert_eq!(question_count(ctx).unwrap(), 1);
            assert_eq!(exclamation_count(ctx).unwrap(), 1);
            assert_eq!(you_word_count(ctx).unwrap(), 2);
            assert_eq!(number_count(ctx).unwrap(), 1);
            assert_eq!(benefit_word_count(ctx).unwrap(), 4);
            assert_eq!(feature_word_count(ctx).unwrap(), 3);
        });
    }

    #[test]
    fn test_missing_headline_is_empty() {
        with_context("<body><p>No headings here.</p></body>", |ctx| {
            assert_eq!(headline_text(ctx).unwrap(), "");
            assert_eq!(headline_char_count(ctx).unwrap(), 0);
            assert!(!headline_is_question(ctx).unwrap());
            assert_eq!(avg_paragraph_word_count(ctx).unwrap(), 3.0);
        });
    }
}
