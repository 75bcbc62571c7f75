//! Lead-capture form scoring, shared by the landing page and the CTA
//! destination page so both are judged by the same rules.

use crate::config::Thresholds;
use crate::error::Result;
use crate::parsers::html;
use crate::patterns;
use scraper::ElementRef;

/// Input types that are not something a visitor fills in
const NON_USER_INPUT_TYPES: [&str; 5] = ["hidden", "checkbox", "radio", "submit", "button"];

const EMAIL_POINTS: i64 = 10;
const NAME_POINTS: i64 = 5;
const PHONE_POINTS: i64 = 3;
const SUBMIT_VERB_POINTS: i64 = 5;
const COMPACT_FORM_POINTS: i64 = 5;
const EXTRA_FIELD_PENALTY: i64 = 2;
const CHECKOUT_PENALTY: i64 = 15;
const LOGIN_PENALTY: i64 = 20;

/// Scoring outcome for one form
#[derive(Debug, Clone, PartialEq)]
pub struct FormAssessment {
    /// Position of the form among the forms that were assessed
    pub index: usize,
    pub field_count: usize,
    pub score: i64,
    pub has_email: bool,
    pub has_name: bool,
    pub has_phone: bool,
    pub is_checkout: bool,
    pub is_login: bool,
}

/// Inputs, selects and textareas a visitor is expected to fill in
pub fn user_facing_fields<'a>(form: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    Ok(html::select_within(form, "input, select, textarea")?
        .into_iter()
        .filter(|field| {
            html::tag(*field) != "input"
                || !NON_USER_INPUT_TYPES.contains(&html::attr_lower(*field, "type").as_str())
        })
        .collect())
}

/// Everything that hints at what a field is for
fn field_hints(field: ElementRef<'_>) -> String {
    ["name", "id", "placeholder", "autocomplete", "aria-label"]
        .iter()
        .map(|attr| html::attr_lower(field, attr))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_email_field(field: ElementRef<'_>) -> bool {
    html::attr_lower(field, "type") == "email" || patterns::FIELD_EMAIL_HINT.is_match(&field_hints(field))
}

pub fn is_name_field(field: ElementRef<'_>) -> bool {
    !is_email_field(field) && patterns::FIELD_NAME_HINT.is_match(&field_hints(field))
}

pub fn is_phone_field(field: ElementRef<'_>) -> bool {
    html::attr_lower(field, "type") == "tel" || patterns::FIELD_PHONE_HINT.is_match(&field_hints(field))
}

/// Scores one form; `None` when it has no user-facing fields or too many
pub fn assess_form(form: ElementRef<'_>, index: usize, thresholds: &Thresholds) -> Result<Option<FormAssessment>> {
    let fields = user_facing_fields(form)?;
    let field_count = fields.len();
    if field_count == 0 || field_count > thresholds.form_max_fields {
        return Ok(None);
    }

    let has_email = fields.iter().any(|f| is_email_field(*f));
    let has_name = fields.iter().any(|f| is_name_field(*f));
    let has_phone = fields.iter().any(|f| is_phone_field(*f));

    let form_hints = format!(
        "{} {}",
        html::class_and_id(form),
        html::attr_lower(form, "action")
    );
    let is_checkout = patterns::FORM_CHECKOUT.is_match(&form_hints);
    let is_login = html::has_within(form, "input[type='password']")?
        || patterns::FORM_LOGIN.is_match(&form_hints);

    let mut score = 0;
    if has_email {
        score += EMAIL_POINTS;
    }
    if has_name {
        score += NAME_POINTS;
    }
    if has_phone {
        score += PHONE_POINTS;
    }
    if has_submit_verb(form)? {
        score += SUBMIT_VERB_POINTS;
    }
    if (3..=5).contains(&field_count) {
        score += COMPACT_FORM_POINTS;
    }
    if field_count > thresholds.form_field_penalty_after {
        let extra = (field_count - thresholds.form_field_penalty_after) as i64;
        score -= EXTRA_FIELD_PENALTY * extra;
    }
    if is_checkout {
        score -= CHECKOUT_PENALTY;
    }
    if is_login {
        score -= LOGIN_PENALTY;
    }

    Ok(Some(FormAssessment {
        index,
        field_count,
        score,
        has_email,
        has_name,
        has_phone,
        is_checkout,
        is_login,
    }))
}

fn has_submit_verb(form: ElementRef<'_>) -> Result<bool> {
    for button in html::select_within(form, "button, input[type='submit'], input[type='button']")? {
        let label = if html::tag(button) == "input" {
            html::attr_lower(button, "value")
        } else {
            html::element_text(button).to_lowercase()
        };
        if patterns::FORM_SUBMIT_VERB.is_match(&label) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Assesses every form and returns the qualifying ones
pub fn assess_forms(forms: &[ElementRef<'_>], thresholds: &Thresholds) -> Result<Vec<FormAssessment>> {
    let mut assessed = Vec::new();
    for (index, form) in forms.iter().enumerate() {
        if let Some(assessment) = assess_form(*form, index, thresholds)? {
            assessed.push(assessment);
        }
    }
    Ok(assessed)
}

/// The highest-scoring form; the first one wins ties
pub fn best_form(assessed: &[FormAssessment]) -> Option<&FormAssessment> {
    let mut best: Option<&FormAssessment> = None;
    for form in assessed {
        if best.is_none_or(|current| form.score > current.score) {
            best = Some(form);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn assess(markup: &str) -> Vec<FormAssessment> {
        let doc = Html::parse_document(markup);
        let forms = html::select_all(&doc, "form").unwrap();
        assess_forms(&forms, &Thresholds::default()).unwrap()
    }

    #[test]
    fn test_lead_form_scoring() {
        let forms = assess(
            r#"<form>
                <input type="text" name="first_name">
                <input type="email" name="work">
                <input type="tel" name="phone">
                <input type="hidden" name="utm">
                <input type="checkbox" name="consent">
                <button type="submit">Get the report</button>
            </form>"#,
        );
        assert_eq!(forms.len(), 1);
        let form = &forms[0];
        assert_eq!(form.field_count, 3);
        assert!(form.has_email && form.has_name && form.has_phone);
        assert_eq!(form.score, 10 + 5 + 3 + 5 + 5);
    }

    #[test]
    fn test_oversized_and_empty_forms_are_skipped() {
        let big = "<input type='text'>".repeat(21);
        let forms = assess(&format!("<form>{big}</form><form><input type='hidden'></form>"));
        assert!(forms.is_empty());
    }

    #[test]
    fn test_field_penalty_past_threshold() {
        let fields = "<input type='text'>".repeat(10);
        let forms = assess(&format!("<form><input type='email'>{fields}</form>"));
        assert_eq!(forms[0].field_count, 11);
        assert_eq!(forms[0].score, 10 - 2 * 3);
    }

    #[test]
    fn test_checkout_and_login_penalties() {
        let forms = assess(
            r#"<form class="checkout-form"><input name="email"><input name="card"></form>
               <form action="/login"><input name="email"><input type="password" name="pw"></form>"#,
        );
        assert_eq!(forms[0].score, 10 - 15);
        assert!(forms[0].is_checkout);
        assert!(forms[1].is_login);
        assert_eq!(forms[1].score, 10 - 20);
    }

    #[test]
    fn test_best_form_prefers_lead_capture() {
        let forms = assess(
            r#"<form role="search"><input type="search" name="q"></form>
               <form><input type="email" placeholder="Your email"><button>Subscribe</button></form>"#,
        );
        let best = best_form(&forms).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.field_count, 1);
    }
}
