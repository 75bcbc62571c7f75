//! Flags rows that probably show a bot wall instead of the real page.
//!
//! A page with no buttons or inputs and fewer than `bot_blocked_words` words
//! is completely blocked; with up to `bot_partial_words` words it is partially
//! blocked. The record is kept either way.

use super::{Detector::*, Feature, FeatureContext};
use crate::error::Result;
use crate::parsers::html;
use crate::parsers::text::word_count;

pub const FEATURES: &[Feature] = &[
    Feature { name: "interactive_element_count", detector: Count(interactive_element_count) },
    Feature { name: "bot_blocked_completely", detector: Flag(bot_blocked_completely) },
    Feature { name: "bot_blocked_partially", detector: Flag(bot_blocked_partially) },
    Feature { name: "bot_detection_suspected", detector: Flag(bot_detection_suspected) },
];

fn interactive_element_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let buttons = html::count(ctx.doc, "button")?;
    let inputs = html::select_all(ctx.doc, "input")?
        .into_iter()
        .filter(|input| html::attr_lower(*input, "type") != "hidden")
        .count();
    Ok(buttons + inputs)
}

fn bot_blocked_completely(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(interactive_element_count(ctx)? == 0 && word_count(&ctx.body_text) < ctx.thresholds.bot_blocked_words)
}

fn bot_blocked_partially(ctx: &FeatureContext<'_>) -> Result<bool> {
    let words = word_count(&ctx.body_text);
    Ok(interactive_element_count(ctx)? == 0
        && words >= ctx.thresholds.bot_blocked_words
        && words <= ctx.thresholds.bot_partial_words)
}

fn bot_detection_suspected(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(bot_blocked_completely(ctx)? || bot_blocked_partially(ctx)?)
}
