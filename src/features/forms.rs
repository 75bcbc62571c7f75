//! Landing-page form features, scored with the same rules as the CTA destination.

use super::{Detector::*, Feature, FeatureContext, marked};
use crate::error::Result;
use crate::forms::{self, FormAssessment};
use crate::parsers::html;
use crate::patterns;

pub const FEATURES: &[Feature] = &[
    Feature { name: "form_count", detector: Count(form_count) },
    Feature { name: "form_field_count", detector: Count(form_field_count) },
    Feature { name: "has_email_capture", detector: Flag(has_email_capture) },
    Feature { name: "input_count", detector: Count(input_count) },
    Feature { name: "has_name_field", detector: Flag(has_name_field) },
    Feature { name: "has_phone_field", detector: Flag(has_phone_field) },
    Feature { name: "has_form_in_hero", detector: Flag(has_form_in_hero) },
    Feature { name: "has_multi_step_form", detector: Flag(has_multi_step_form) },
    Feature { name: "has_form_privacy_text", detector: Flag(has_form_privacy_text) },
];

fn assessed(ctx: &FeatureContext<'_>) -> Result<Vec<FormAssessment>> {
    let forms_found = html::select_all(ctx.doc, "form")?;
    forms::assess_forms(&forms_found, ctx.thresholds)
}

fn form_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "form")
}

fn form_field_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(forms::best_form(&assessed(ctx)?)
        .map(|f| f.field_count)
        .unwrap_or(0))
}

fn has_email_capture(ctx: &FeatureContext<'_>) -> Result<bool> {
    if assessed(ctx)?.iter().any(|f| f.has_email && !f.is_login) {
        return Ok(true);
    }
    // email inputs wired up by script outside any form
    Ok(html::count(ctx.doc, "input[type='email']")? > 0)
}

fn input_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(forms::user_facing_fields(html::body(ctx.doc))?.len())
}

fn has_name_field(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(forms::user_facing_fields(html::body(ctx.doc))?
        .into_iter()
        .any(forms::is_name_field))
}

fn has_phone_field(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(forms::user_facing_fields(html::body(ctx.doc))?
        .into_iter()
        .any(forms::is_phone_field))
}

fn has_form_in_hero(ctx: &FeatureContext<'_>) -> Result<bool> {
    ctx.hero.has("form")
}

fn has_multi_step_form(ctx: &FeatureContext<'_>) -> Result<bool> {
    for form in html::select_all(ctx.doc, "form")? {
        if html::select_within(form, "fieldset")?.len() > 1
            || html::has_within(form, "progress, [role='progressbar'], [data-step]")?
        {
            return Ok(true);
        }
        if patterns::FORM_MULTI_STEP.is_match(&html::class_and_id(form)) {
            return Ok(true);
        }
    }
    Ok(marked(ctx.doc, &patterns::FORM_MULTI_STEP)?
        .into_iter()
        .any(|el| html::has_within(el, "form, input").unwrap_or(false)))
}

fn has_form_privacy_text(ctx: &FeatureContext<'_>) -> Result<bool> {
    for form in html::select_all(ctx.doc, "form")? {
        let near = html::parent_element(form).unwrap_or(form);
        if patterns::FORM_PRIVACY_NOTE.is_match(&html::element_text(near).to_lowercase()) {
            return Ok(true);
        }
    }
    Ok(false)
}
