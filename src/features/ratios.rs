//! Derived ratios, computed once every base feature is in the record.

use crate::results::Record;

/// `name = numerator / denominator * scale`, 0 when the denominator is 0
pub struct Ratio {
    pub name: &'static str,
    pub numerator: &'static str,
    pub denominator: &'static str,
    pub scale: f64,
}

pub const RATIOS: &[Ratio] = &[
    Ratio {
        name: "cta_to_content_ratio",
        numerator: "cta_count",
        denominator: "main_content_word_count",
        scale: 100.0,
    },
    Ratio {
        name: "image_to_text_ratio",
        numerator: "image_count",
        denominator: "main_content_word_count",
        scale: 100.0,
    },
    Ratio {
        name: "testimonial_to_section_ratio",
        numerator: "testimonial_count",
        denominator: "section_count",
        scale: 1.0,
    },
    Ratio {
        name: "benefit_to_feature_ratio",
        numerator: "benefit_word_count",
        denominator: "feature_word_count",
        scale: 1.0,
    },
];

impl Ratio {
    pub fn compute(&self, record: &Record) -> f64 {
        let denominator = record.number(self.denominator);
        if denominator == 0.0 || !denominator.is_finite() {
            return 0.0;
        }
        let value = record.number(self.numerator) / denominator * self.scale;
        if value.is_finite() { value } else { 0.0 }
    }
}

/// Adds every ratio to a feature record; error rows are left alone
pub fn apply(record: &mut Record) {
    if record.is_error() {
        return;
    }
    for ratio in RATIOS {
        let value = ratio.compute(record);
        record.insert(ratio.name, value);
    }
}
