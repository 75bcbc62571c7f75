//! Trust and social proof signals.
//!
//! Flags OR several independent strategies; counts take the maximum across
//! strategies so one testimonial found twice is still one.

use super::{Detector::*, Feature, FeatureContext, heading_text, image_hints, innermost, link_hrefs, marked};
use crate::error::Result;
use crate::parsers::html;
use crate::patterns;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const FEATURES: &[Feature] = &[
    Feature { name: "has_testimonials", detector: Flag(has_testimonials) },
    Feature { name: "testimonial_count", detector: Count(testimonial_count) },
    Feature { name: "has_star_ratings", detector: Flag(has_star_ratings) },
    Feature { name: "has_trust_badges", detector: Flag(has_trust_badges) },
    Feature { name: "trust_badge_count", detector: Count(trust_badge_count) },
    Feature { name: "has_client_logos", detector: Flag(has_client_logos) },
    Feature { name: "logo_count", detector: Count(logo_count) },
    Feature { name: "has_guarantee", detector: Flag(has_guarantee) },
    Feature { name: "has_security_badges", detector: Flag(has_security_badges) },
    Feature { name: "has_social_proof_numbers", detector: Flag(has_social_proof_numbers) },
    Feature { name: "has_case_studies", detector: Flag(has_case_studies) },
    Feature { name: "has_awards", detector: Flag(has_awards) },
    Feature { name: "has_press_mentions", detector: Flag(has_press_mentions) },
    Feature { name: "has_social_links", detector: Flag(has_social_links) },
    Feature { name: "social_link_count", detector: Count(social_link_count) },
    Feature { name: "has_integrations", detector: Flag(has_integrations) },
];

/// Class names that look like a testimonial but are not one
#[allow(clippy::expect_used)]
static TESTIMONIAL_FALSE_FRIENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)preview|reviewer[-_]?(?:name|avatar)|blockquote[-_]?icon|quote[-_]?(?:icon|mark)")
        .expect("TESTIMONIAL_FALSE_FRIENDS regex")
});

/// Logo strips need at least this many logos to count as client logos
const MIN_CLIENT_LOGOS: usize = 2;

fn testimonial_cards<'a>(ctx: &FeatureContext<'a>) -> Result<Vec<scraper::ElementRef<'a>>> {
    let marked = marked(ctx.doc, &patterns::TESTIMONIAL_CLASS)?
        .into_iter()
        .filter(|el| !TESTIMONIAL_FALSE_FRIENDS.is_match(&html::class_and_id(*el)))
        .collect();
    Ok(innermost(marked))
}

fn testimonial_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let cards = testimonial_cards(ctx)?.len();
    let quotes = html::count(ctx.doc, "blockquote")?;
    let schema = html::count(ctx.doc, "[itemtype*='schema.org/Review']")?;
    Ok(cards.max(quotes).max(schema))
}

fn has_testimonials(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(testimonial_count(ctx)? > 0 || patterns::TESTIMONIAL_HEADING.is_match(&heading_text(ctx.doc)?))
}

fn has_star_ratings(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "[itemprop='ratingValue'], [itemtype*='AggregateRating']")? > 0
        || !marked(ctx.doc, &patterns::STAR_RATING)?.is_empty()
        || ctx.body_text.contains('★')
        || ctx.body_text.contains('⭐'))
}

fn trust_badge_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let images = image_hints(ctx.doc)?
        .lines()
        .filter(|hints| patterns::TRUST_BADGE.is_match(hints))
        .count();
    let marked = innermost(marked(ctx.doc, &patterns::TRUST_BADGE)?).len();
    Ok(images.max(marked))
}

fn has_trust_badges(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(trust_badge_count(ctx)? > 0 || has_security_badges(ctx)?)
}

fn logo_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let mut in_strips = 0;
    for strip in innermost(marked(ctx.doc, &patterns::LOGO_CLASS)?) {
        in_strips = in_strips.max(html::select_within(strip, "img, svg")?.len());
    }
    // the first logo image is usually the site's own
    let by_alt = image_hints(ctx.doc)?
        .lines()
        .filter(|hints| hints.contains("logo"))
        .count()
        .saturating_sub(1);
    Ok(in_strips.max(by_alt))
}

fn has_client_logos(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(logo_count(ctx)? >= MIN_CLIENT_LOGOS)
}

fn has_guarantee(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::GUARANTEE.is_match(&ctx.body_lower)
        || html::count(ctx.doc, "[class*='guarantee'], [id*='guarantee']")? > 0)
}

fn has_security_badges(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::SECURITY_BADGE.is_match(&ctx.body_lower)
        || patterns::SECURITY_BADGE.is_match(&image_hints(ctx.doc)?))
}

fn has_social_proof_numbers(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::SOCIAL_PROOF_NUMBER.is_match(&ctx.body_lower))
}

fn has_case_studies(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::CASE_STUDY.is_match(&ctx.body_lower)
        || link_hrefs(ctx.doc)?
            .iter()
            .any(|href| href.contains("case-stud") || href.contains("customer-stor")))
}

fn has_awards(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::AWARD.is_match(&heading_text(ctx.doc)?)
        || patterns::AWARD.is_match(&image_hints(ctx.doc)?)
        || html::count(ctx.doc, "[class*='award'], [id*='award']")? > 0)
}

fn has_press_mentions(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::PRESS_MENTION.is_match(&heading_text(ctx.doc)?)
        || html::count(ctx.doc, "[class*='press'], [id*='press'], [class*='as-seen'], [class*='featured-in']")? > 0)
}

fn social_links(ctx: &FeatureContext<'_>) -> Result<Vec<String>> {
    Ok(link_hrefs(ctx.doc)?
        .into_iter()
        .filter(|href| patterns::SOCIAL_HOST.is_match(href))
        .collect())
}

fn has_social_links(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(!social_links(ctx)?.is_empty())
}

/// Distinct social profile URLs; header and footer often repeat the same set
fn social_link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(social_links(ctx)?
        .into_iter()
        .map(|href| href.trim_end_matches('/').to_string())
        .collect::<HashSet<_>>()
        .len())
}

fn has_integrations(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::INTEGRATIONS.is_match(&heading_text(ctx.doc)?)
        || html::count(ctx.doc, "[class*='integration'], [id*='integration']")? > 0
        || link_hrefs(ctx.doc)?.iter().any(|href| href.contains("/integrations")))
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
    fn test_testimonial_cards_are_counted_once() {
        let markup = r#"<body><section class="testimonials"><h2>What our customers say</h2>
            <div class="testimonial"><blockquote>Great tool.</blockquote></div>
            <div class="testimonial"><blockquote>Saved us hours.</blockquote></div>
            <div class="testimonial"><p>Would buy again.</p></div>
        </section></body>"#;
        with_context(markup, |ctx| {
            assert!(has_testimonials(ctx).unwrap());
            assert_eq!(testimonial_count(ctx).unwrap(), 3);
        });
    }

    #[test]
    fn test_logo_strip() {
        let markup = r#"<body><img src="/logo.svg" alt="Acme logo">
            <div class="client-logos"><img alt="Globex"><img alt="Initech"><img alt="Umbrella"></div></body>"#;
        with_context(markup, |ctx| {
            assert_eq!(logo_count(ctx).unwrap(), 3);
            assert!(has_client_logos(ctx).unwrap());
        });
    }

    #[test]
    fn test_guarantee_and_security_are_multilingual() {
        let markup = "<body><p>30 Tage Geld-zurück-Garantie. SSL verschlüsselt.</p></body>";
        with_context(markup, |ctx| {
            assert!(has_guarantee(ctx).unwrap());
            assert!(has_security_badges(ctx).unwrap());
            assert!(has_trust_badges(ctx).unwrap());
        });
    }

    #[test]
    fn test_social_links_are_deduplicated() {
        let markup = r#"<body>
            <a href="https://twitter.com/acme">t</a><a href="https://twitter.com/acme/">t</a>
            <a href="https://www.linkedin.com/company/acme">in</a><a href="https://fedex.com/">fedex</a>
            <p>Join 10,000+ happy customers</p></body>"#;
        with_context(markup, |ctx| {
            assert!(has_social_links(ctx).unwrap());
            assert_eq!(social_link_count(ctx).unwrap(), 2);
            assert!(has_social_proof_numbers(ctx).unwrap());
        });
    }

    #[test]
    fn test_plain_page_has_no_trust_signals() {
        with_context("<body><h1>Hello</h1><p>Plain text only.</p></body>", |ctx| {
            assert!(!has_testimonials(ctx).unwrap());
            assert!(!has_star_ratings(ctx).unwrap());
            assert!(!has_trust_badges(ctx).unwrap());
            assert!(!has_client_logos(ctx).unwrap());
            assert!(!has_social_links(ctx).unwrap());
        });
    }
}
