//! Rendered geometry used by the above-the-fold features.
//!
//! The renderer runs [`MEASURE_SCRIPT`] once per page. For each group it returns
//! the boxes of `document.querySelectorAll(selector)` in document order, so box
//! `n` of a group belongs to element `n` of the same selector in the parsed DOM.

use crate::cta::BUTTON_LIKE_SELECTOR;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Element groups measured by the layout script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutGroup {
    Cta,
    Button,
    Image,
    Form,
    Headline,
    Video,
}

impl LayoutGroup {
    pub const ALL: [LayoutGroup; 6] = [
        LayoutGroup::Cta,
        LayoutGroup::Button,
        LayoutGroup::Image,
        LayoutGroup::Form,
        LayoutGroup::Headline,
        LayoutGroup::Video,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LayoutGroup::Cta => "cta",
            LayoutGroup::Button => "button",
            LayoutGroup::Image => "img",
            LayoutGroup::Form => "form",
            LayoutGroup::Headline => "h1",
            LayoutGroup::Video => "video",
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            LayoutGroup::Cta => BUTTON_LIKE_SELECTOR,
            LayoutGroup::Button => "button, input[type='submit'], input[type='button']",
            LayoutGroup::Image => "img",
            LayoutGroup::Form => "form",
            LayoutGroup::Headline => "h1",
            LayoutGroup::Video => {
                "video, iframe[src*='youtube'], iframe[src*='vimeo'], iframe[src*='wistia']"
            }
        }
    }
}

/// Bounding box of one element, in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
    pub visible: bool,
}

/// Geometry reported by the renderer for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMap {
    #[serde(rename = "viewport")]
    pub viewport_height: f64,
    #[serde(default)]
    pub groups: HashMap<String, Vec<ElementBox>>,
}

/// Collects viewport height and element boxes per selector group.
///
/// Called with one argument: an object mapping group keys to selectors.
pub const MEASURE_SCRIPT: &str = r#"
const groups = arguments[0];
const scrollY = window.scrollY || 0;
const out = { viewport: window.innerHeight, groups: {} };
for (const [key, selector] of Object.entries(groups)) {
  out.groups[key] = Array.from(document.querySelectorAll(selector)).map((el) => {
    const rect = el.getBoundingClientRect();
    const style = window.getComputedStyle(el);
    return {
      top: rect.top + scrollY,
      height: rect.height,
      visible: style.display !== 'none' && style.visibility !== 'hidden'
        && rect.width > 0 && rect.height > 0,
    };
  });
}
return out;
"#;

/// Argument object passed to [`MEASURE_SCRIPT`]
pub fn measure_arguments() -> serde_json::Value {
    let groups: serde_json::Map<String, serde_json::Value> = LayoutGroup::ALL
        .iter()
        .map(|g| (g.key().to_string(), serde_json::Value::from(g.selector())))
        .collect();
    serde_json::Value::Object(groups)
}

impl LayoutMap {
    /// Parses the value returned by [`MEASURE_SCRIPT`]
    pub fn from_measurements(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Whether a renderer actually measured this page
    pub fn is_measured(&self) -> bool {
        self.viewport_height > 0.0
    }

    fn boxes(&self, group: LayoutGroup) -> &[ElementBox] {
        self.groups.get(group.key()).map(Vec::as_slice).unwrap_or_default()
    }

    fn box_above_fold(&self, b: &ElementBox) -> bool {
        b.visible && b.top < self.viewport_height && b.top + b.height > 0.0
    }

    /// Whether element `index` of `group` is visible in the first viewport
    pub fn is_above_fold(&self, group: LayoutGroup, index: usize) -> bool {
        self.is_measured()
            && self
                .boxes(group)
                .get(index)
                .is_some_and(|b| self.box_above_fold(b))
    }

    /// Number of `group` elements visible in the first viewport
    pub fn count_above_fold(&self, group: LayoutGroup) -> usize {
        if !self.is_measured() {
            return 0;
        }
        self.boxes(group)
            .iter()
            .filter(|b| self.box_above_fold(b))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LayoutMap {
        LayoutMap::from_measurements(json!({
            "viewport": 800.0,
            "groups": {
                "img": [
                    {"top": 100.0, "height": 300.0, "visible": true},
                    {"top": 1200.0, "height": 300.0, "visible": true},
                    {"top": 50.0, "height": 20.0, "visible": false}
                ],
                "cta": [{"top": 790.0, "height": 40.0, "visible": true}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_only_visible_boxes_in_first_viewport() {
        let layout = sample();
        assert_eq!(layout.count_above_fold(LayoutGroup::Image), 1);
        assert!(layout.is_above_fold(LayoutGroup::Cta, 0));
        assert!(!layout.is_above_fold(LayoutGroup::Cta, 1));
        assert_eq!(layout.count_above_fold(LayoutGroup::Form), 0);
    }

    #[test]
    fn test_unmeasured_layout_reports_nothing() {
        let layout = LayoutMap::default();
        assert!(!layout.is_measured());
        assert!(!layout.is_above_fold(LayoutGroup::Headline, 0));
    }

    #[test]
    fn test_measure_arguments_cover_every_group() {
        let args = measure_arguments();
        for group in LayoutGroup::ALL {
            assert_eq!(args[group.key()], json!(group.selector()));
        }
    }
}
