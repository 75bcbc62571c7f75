//! Above-the-fold features. They read the geometry the renderer measured and
//! report zeros when the page was not measured.

use super::{Detector::*, Feature, FeatureContext};
use crate::error::Result;
use crate::layout::LayoutGroup;

pub const FEATURES: &[Feature] = &[
    Feature { name: "viewport_height", detector: Real(viewport_height) },
    Feature { name: "primary_cta_above_fold", detector: Flag(primary_cta_above_fold) },
    Feature { name: "buttons_above_fold", detector: Count(buttons_above_fold) },
    Feature { name: "images_above_fold", detector: Count(images_above_fold) },
    Feature { name: "form_above_fold", detector: Flag(form_above_fold) },
    Feature { name: "headline_above_fold", detector: Flag(headline_above_fold) },
    Feature { name: "video_above_fold", detector: Flag(video_above_fold) },
];

fn viewport_height(ctx: &FeatureContext<'_>) -> Result<f64> {
    Ok(ctx.layout.viewport_height)
}

fn primary_cta_above_fold(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx
        .cta
        .position
        .is_some_and(|pos| ctx.layout.is_above_fold(LayoutGroup::Cta, pos)))
}

fn buttons_above_fold(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(ctx.layout.count_above_fold(LayoutGroup::Button))
}

fn images_above_fold(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(ctx.layout.count_above_fold(LayoutGroup::Image))
}

fn form_above_fold(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.layout.count_above_fold(LayoutGroup::Form) > 0)
}

fn headline_above_fold(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.layout.is_above_fold(LayoutGroup::Headline, 0))
}

fn video_above_fold(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.layout.count_above_fold(LayoutGroup::Video) > 0)
}
