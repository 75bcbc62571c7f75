use crate::config::Thresholds;
use crate::error::ExtractError;
use crate::features::{self, Detector, Feature, FeatureContext, TEXT_FEATURE_CHARS};
use crate::layout::LayoutMap;
use crate::results::{FeatureValue, Record};
use scraper::Html;
use std::collections::HashSet;

fn with_context<T>(markup: &str, f: impl FnOnce(&FeatureContext<'_>) -> T) -> T {
    let doc = Html::parse_document(markup);
    let layout = LayoutMap::default();
    let thresholds = Thresholds::default();
    let ctx = FeatureContext::new(&doc, "https://example.com/", &layout, &thresholds);
    f(&ctx)
}

#[test]
fn test_feature_names_are_unique() {
    let mut seen = HashSet::new();
    for feature in features::registry() {
        assert!(seen.insert(feature.name), "duplicate feature {}", feature.name);
    }
    assert!(seen.len() > 100);
}

#[test]
fn test_blank_page_emits_every_non_optional_feature() {
    let mut record = Record::new("https://example.com/");
    with_context("", |ctx| features::extract_into(ctx, &mut record));

    for feature in features::registry() {
        let present = record.contains(feature.name);
        match feature.detector {
            Detector::Optional(_) => assert!(!present, "{} should be absent", feature.name),
            _ => assert!(present, "{} missing", feature.name),
        }
    }
}

#[test]
fn test_failing_detector_falls_back_to_typed_default() {
    let failing = [
        Feature {
            name: "always_fails_flag",
            detector: Detector::Flag(|_| Err(ExtractError::Config("broken".to_string()))),
        },
        Feature {
            name: "always_fails_real",
            detector: Detector::Real(|_| Err(ExtractError::Config("broken".to_string()))),
        },
        Feature {
            name: "always_fails_text",
            detector: Detector::Text(|_| Err(ExtractError::Config("broken".to_string()))),
        },
        Feature {
            name: "always_fails_optional",
            detector: Detector::Optional(|_| Err(ExtractError::Config("broken".to_string()))),
        },
    ];
    let values: Vec<_> = with_context("<body><h1>Hi</h1></body>", |ctx| {
        failing.iter().map(|f| features::evaluate(f, ctx)).collect()
    });
    assert_eq!(
        values,
        vec![
            Some(FeatureValue::Int(0)),
            Some(FeatureValue::Float(0.0)),
            Some(FeatureValue::Text(String::new())),
            None,
        ]
    );
}

#[test]
fn test_panicking_detector_is_contained() {
    let panicking = Feature {
        name: "panics",
        detector: Detector::Count(|ctx| {
            let nodes = ctx.doc.root_element().children().count();
            panic!("detector bug after {nodes} nodes")
        }),
    };
    let healthy = Feature {
        name: "h1_present",
        detector: Detector::Flag(|ctx| ctx.main.has("h1")),
    };

    let (bad, good) = with_context("<body><h1>Hi</h1></body>", |ctx| {
        (features::evaluate(&panicking, ctx), features::evaluate(&healthy, ctx))
    });
    assert_eq!(bad, Some(FeatureValue::Int(0)));
    assert_eq!(good, Some(FeatureValue::Int(1)));
}

#[test]
fn test_text_features_are_truncated() {
    let long = Feature {
        name: "long_text",
        detector: Detector::Text(|_| Ok("x".repeat(500))),
    };
    let value = with_context("", |ctx| features::evaluate(&long, ctx));
    let text = value.as_ref().and_then(FeatureValue::as_str).unwrap_or_default();
    assert_eq!(text.chars().count(), TEXT_FEATURE_CHARS);
}
