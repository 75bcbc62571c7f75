//! Urgency, offers, pricing and on-page engagement widgets.

use super::{
    Detector::*, Feature, FeatureContext, declares_schema_type, heading_text, link_hrefs, marked,
};
use crate::error::Result;
use crate::parsers::html;
use crate::patterns;

pub const FEATURES: &[Feature] = &[
    Feature { name: "has_urgency", detector: Flag(has_urgency) },
    Feature { name: "urgency_count", detector: Count(urgency_count) },
    Feature { name: "has_countdown_timer", detector: Flag(has_countdown_timer) },
    Feature { name: "has_scarcity", detector: Flag(has_scarcity) },
    Feature { name: "has_discount", detector: Flag(has_discount) },
    Feature { name: "discount_percentage", detector: Optional(discount_percentage) },
    Feature { name: "has_free_trial", detector: Flag(has_free_trial) },
    Feature { name: "has_free_shipping", detector: Flag(has_free_shipping) },
    Feature { name: "has_pricing", detector: Flag(has_pricing) },
    Feature { name: "price_count", detector: Count(price_count) },
    Feature { name: "has_faq", detector: Flag(has_faq) },
    Feature { name: "faq_count", detector: Count(faq_count) },
    Feature { name: "has_comparison_table", detector: Flag(has_comparison_table) },
    Feature { name: "has_modal_trigger", detector: Flag(has_modal_trigger) },
    Feature { name: "modal_trigger_count", detector: Count(modal_trigger_count) },
    Feature { name: "has_live_chat", detector: Flag(has_live_chat) },
];

fn urgency_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::URGENCY.find_iter(&ctx.body_lower).count())
}

fn has_countdown_timer(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(!marked(ctx.doc, &patterns::COUNTDOWN_CLASS)?.is_empty()
        || html::count(ctx.doc, "[data-countdown], [data-deadline], [data-timer]")? > 0)
}

fn has_urgency(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(urgency_count(ctx)? > 0 || has_countdown_timer(ctx)?)
}

fn has_scarcity(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::SCARCITY.is_match(&ctx.body_lower))
}

fn has_discount(ctx: &FeatureContext<'_>) -> Result<bool> {
    if patterns::DISCOUNT.is_match(&ctx.body_lower) {
        return Ok(true);
    }
    // struck-through old price
    Ok(html::select_all(ctx.doc, "del, s, strike, [class*='old-price'], [class*='was-price']")?
        .into_iter()
        .any(|el| patterns::PRICE.is_match(&html::element_text(el))))
}

/// Largest percentage discount mentioned on the page
fn discount_percentage(ctx: &FeatureContext<'_>) -> Result<Option<f64>> {
    Ok(patterns::DISCOUNT_PERCENT
        .captures_iter(&ctx.body_lower)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .fold(None, |best: Option<f64>, pct| Some(best.map_or(pct, |b| b.max(pct)))))
}

fn has_free_trial(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::FREE_TRIAL.is_match(&ctx.body_lower))
}

fn has_free_shipping(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::FREE_SHIPPING.is_match(&ctx.body_lower))
}

fn price_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(patterns::PRICE.find_iter(&ctx.body_lower).count())
}

fn has_pricing(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(price_count(ctx)? > 0
        || !marked(ctx.doc, &patterns::PRICING_CLASS)?.is_empty()
        || link_hrefs(ctx.doc)?.iter().any(|href| href.contains("pricing")))
}

fn faq_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let details = html::count(ctx.doc, "details")?;
    let schema = html::count(ctx.doc, "[itemtype*='schema.org/Question']")?;
    let mut in_sections = 0;
    for section in super::innermost(html::select_all(ctx.doc, "[class*='faq'], [id*='faq'], [class*='FAQ']")?) {
        in_sections += html::select_within(section, "h3, h4, h5, dt, summary, [class*='question']")?.len();
    }
    Ok(details.max(schema).max(in_sections))
}

fn has_faq(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::FAQ.is_match(&heading_text(ctx.doc)?)
        || html::count(ctx.doc, "[class*='faq'], [id*='faq'], [class*='FAQ'], [itemtype*='FAQPage']")? > 0
        || declares_schema_type(ctx.doc, "FAQPage")?
        || html::count(ctx.doc, "details")? >= 2)
}

fn has_comparison_table(ctx: &FeatureContext<'_>) -> Result<bool> {
    for table in html::select_all(ctx.doc, "table")? {
        let text = html::element_text(table);
        if patterns::COMPARISON.is_match(&html::class_and_id(table))
            || patterns::COMPARISON.is_match(&text.to_lowercase())
            || text.contains(['✓', '✔', '✗', '✘', '×'])
        {
            return Ok(true);
        }
    }
    Ok(patterns::COMPARISON.is_match(&heading_text(ctx.doc)?) && html::count(ctx.doc, "table")? > 0)
}

fn modal_trigger_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let by_attribute = html::count(
        ctx.doc,
        "[data-toggle='modal'], [data-bs-toggle='modal'], [aria-haspopup='dialog'], [data-modal], [data-popup], [data-lightbox]",
    )?;
    let by_class = html::select_all(ctx.doc, "a, button")?
        .into_iter()
        .filter(|el| patterns::MODAL_TRIGGER.is_match(&html::class_and_id(*el)))
        .count();
    Ok(by_attribute.max(by_class))
}

fn has_modal_trigger(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(modal_trigger_count(ctx)? > 0)
}

fn has_live_chat(ctx: &FeatureContext<'_>) -> Result<bool> {
    let sources = html::select_all(ctx.doc, "script[src], iframe[src]")?
        .into_iter()
        .map(|el| html::attr_lower(el, "src"))
        .collect::<Vec<_>>()
        .join("\n");
    if patterns::LIVE_CHAT.is_match(&sources) {
        return Ok(true);
    }
    // inline loaders
    let inline = html::select_all(ctx.doc, "script:not([src])")?
        .into_iter()
        .any(|s| patterns::LIVE_CHAT.is_match(&s.inner_html().to_lowercase()));
    Ok(inline || !marked(ctx.doc, &patterns::LIVE_CHAT)?.is_empty())
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
    fn test_discount_percentage_takes_largest() {
        let markup = "<body><p>Save 20% on annual plans. Today only: 35% off everything.</p></body>";
        with_context(markup, |ctx| {
            assert!(has_discount(ctx).unwrap());
            assert_eq!(discount_percentage(ctx).unwrap(), Some(35.0));
        });
    }

    #[test]
    fn test_discount_percentage_absent() {
        with_context("<body><p>Simple pricing.</p></body>", |ctx| {
            assert_eq!(discount_percentage(ctx).unwrap(), None);
        });
    }

    #[test]
    fn test_urgency_and_countdown() {
        let markup = r#"<body><p>Angebot nur heute!</p><div class="countdown" data-deadline="2025-01-01"></div></body>"#;
        with_context(markup, |ctx| {
            assert_eq!(urgency_count(ctx).unwrap(), 1);
            assert!(has_countdown_timer(ctx).unwrap());
            assert!(has_urgency(ctx).unwrap());
        });
    }

    #[test]
    fn test_pricing_and_faq() {
        let markup = r#"<body><div class="pricing"><span>$29/mo</span><span>$99/mo</span></div>
            <h2>Frequently asked questions</h2>
            <details><summary>Can I cancel?</summary>Yes.</details>
            <details><summary>Is there a trial?</summary>Yes, a 14-day free trial.</details></body>"#;
        with_context(markup, |ctx| {
            assert!(has_pricing(ctx).unwrap());
            assert_eq!(price_count(ctx).unwrap(), 2);
            assert!(has_faq(ctx).unwrap());
            assert_eq!(faq_count(ctx).unwrap(), 2);
            assert!(has_free_trial(ctx).unwrap());
        });
    }

    #[test]
    fn test_faq_from_structured_data() {
        let json_ld = r#"<body><script type="application/ld+json">{"@type": "FAQPage", "mainEntity": []}</script></body>"#;
        with_context(json_ld, |ctx| assert!(has_faq(ctx).unwrap()));
        with_context(r#"<body><p>"FAQPage"</p></body>"#, |ctx| assert!(!has_faq(ctx).unwrap()));
    }

    #[test]
    fn test_widgets() {
        let markup = r##"<body>
            <table class="plan-comparison"><tr><td>SSO</td><td>✓</td></tr></table>
            <button data-bs-toggle="modal" data-bs-target="#signup">Sign up</button>
            <script src="https://widget.intercom.io/widget/abc"></script></body>"##;
        with_context(markup, |ctx| {
            assert!(has_comparison_table(ctx).unwrap());
            assert_eq!(modal_trigger_count(ctx).unwrap(), 1);
            assert!(has_modal_trigger(ctx).unwrap());
            assert!(has_live_chat(ctx).unwrap());
        });
    }
}
