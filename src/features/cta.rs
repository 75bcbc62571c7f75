//! Features describing the primary call to action and CTA density.

use super::{Detector::*, Feature, FeatureContext};
use crate::cta::candidates;
use crate::error::Result;
use crate::parsers::html;
use crate::parsers::text::word_count;
use crate::patterns;
use std::collections::HashSet;

pub const FEATURES: &[Feature] = &[
    Feature { name: "has_primary_cta", detector: Flag(has_primary_cta) },
    Feature { name: "primary_cta_text", detector: Text(primary_cta_text) },
    Feature { name: "primary_cta_score", detector: Count(primary_cta_score) },
    Feature { name: "primary_cta_tag", detector: Text(primary_cta_tag) },
    Feature { name: "primary_cta_class", detector: Text(primary_cta_class) },
    Feature { name: "primary_cta_href", detector: Text(primary_cta_href) },
    Feature { name: "primary_cta_in_hero", detector: Flag(primary_cta_in_hero) },
    Feature { name: "primary_cta_has_action_verb", detector: Flag(primary_cta_has_action_verb) },
    Feature { name: "primary_cta_has_urgency", detector: Flag(primary_cta_has_urgency) },
    Feature { name: "primary_cta_word_count", detector: Count(primary_cta_word_count) },
    Feature { name: "primary_cta_is_button", detector: Flag(primary_cta_is_button) },
    Feature { name: "cta_count", detector: Count(cta_count) },
    Feature { name: "button_count", detector: Count(button_count) },
    Feature { name: "unique_cta_text_count", detector: Count(unique_cta_text_count) },
];

fn has_primary_cta(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.cta.is_found())
}

fn primary_cta_text(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(ctx.cta.text.clone())
}

fn primary_cta_score(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(usize::try_from(ctx.cta.score).unwrap_or(0))
}

fn primary_cta_tag(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(ctx.cta.tag.clone())
}

fn primary_cta_class(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(ctx.cta.class.clone())
}

fn primary_cta_href(ctx: &FeatureContext<'_>) -> Result<String> {
    Ok(ctx.cta.href.clone())
}

fn primary_cta_in_hero(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.cta.element(ctx.doc)?.is_some_and(|el| ctx.hero.contains(el)))
}

fn primary_cta_has_action_verb(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::CTA_ACTION_VERB.is_match(&ctx.cta.text.to_lowercase()))
}

fn primary_cta_has_urgency(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(patterns::CTA_URGENCY_WORD.is_match(&ctx.cta.text.to_lowercase()))
}

fn primary_cta_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(word_count(&ctx.cta.text))
}

fn primary_cta_is_button(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(matches!(ctx.cta.tag.as_str(), "button" | "input"))
}

fn cta_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(candidates(ctx.doc, ctx.thresholds)?.len())
}

fn button_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "button, input[type='submit'], input[type='button']")
}

fn unique_cta_text_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(candidates(ctx.doc, ctx.thresholds)?
        .into_iter()
        .map(|c| c.text)
        .collect::<HashSet<_>>()
        .len())
}
