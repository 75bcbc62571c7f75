use crate::error::{ExtractError, Result};
use crate::parsers::text::normalize_whitespace;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Elements whose text never counts as page copy
const NON_CONTENT_TAGS: [&str; 6] = ["script", "style", "noscript", "template", "svg", "iframe"];

/// Parses a CSS selector, reporting the selector text on failure
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// All elements in the document matching `css`, in document order
pub fn select_all<'a>(doc: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).collect())
}

/// First element in the document matching `css`
pub fn select_first<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).next())
}

/// Number of elements in the document matching `css`
pub fn count(doc: &Html, css: &str) -> Result<usize> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).count())
}

/// Descendants of `el` matching `css`
pub fn select_within<'a>(el: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(el.select(&sel).collect())
}

/// Whether `el` has a descendant matching `css`
pub fn has_within(el: ElementRef<'_>, css: &str) -> Result<bool> {
    let sel = selector(css)?;
    Ok(el.select(&sel).next().is_some())
}

/// Trimmed, whitespace-collapsed text of an element, skipping scripts and styles
pub fn element_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(el, &mut raw);
    normalize_whitespace(&raw)
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(element) if NON_CONTENT_TAGS.contains(&element.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// The document body, or the root element for fragments without one
pub fn body(doc: &Html) -> ElementRef<'_> {
    select_first(doc, "body")
        .ok()
        .flatten()
        .unwrap_or_else(|| doc.root_element())
}

/// Visible text of the whole body
pub fn body_text(doc: &Html) -> String {
    element_text(body(doc))
}

/// Lowercased `class` and `id` attributes joined by a space
pub fn class_and_id(el: ElementRef<'_>) -> String {
    let element = el.value();
    let class = element.attr("class").unwrap_or_default();
    let id = element.attr("id").unwrap_or_default();
    format!("{class} {id}").trim().to_lowercase()
}

/// Lowercased attribute value, empty when absent
pub fn attr_lower(el: ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).unwrap_or_default().to_lowercase()
}

/// Tag name of an element
pub fn tag(el: ElementRef<'_>) -> &str {
    el.value().name()
}

/// Child elements (not text nodes) of `el`
pub fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Nearest parent that is an element
pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Ancestor elements from the nearest outward
pub fn ancestor_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.ancestors().filter_map(ElementRef::wrap)
}

/// A subtree handle into a parsed page made of zero or more elements.
///
/// An empty region is a valid value: queries on it return nothing.
#[derive(Debug, Clone, Default)]
pub struct Region<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> Region<'a> {
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn single(el: ElementRef<'a>) -> Self {
        Self { elements: vec![el] }
    }

    /// A region over `elements`; elements nested inside another one are dropped
    pub fn from_elements(elements: Vec<ElementRef<'a>>) -> Self {
        let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
        let elements = elements
            .into_iter()
            .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
            .collect();
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[ElementRef<'a>] {
        &self.elements
    }

    /// Descendants of the region matching `css`, each reported once
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'a>>> {
        let sel = selector(css)?;
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for root in &self.elements {
            for el in root.select(&sel) {
                if seen.insert(el.id()) {
                    found.push(el);
                }
            }
        }
        Ok(found)
    }

    /// Whether any element of the region has a descendant matching `css`
    pub fn has(&self, css: &str) -> Result<bool> {
        let sel = selector(css)?;
        Ok(self
            .elements
            .iter()
            .any(|root| root.select(&sel).next().is_some()))
    }

    /// Whether `el` is one of the region's elements or lies inside one
    pub fn contains(&self, el: ElementRef<'_>) -> bool {
        self.elements.iter().any(|root| {
            root.id() == el.id() || el.ancestors().any(|a| a.id() == root.id())
        })
    }

    /// Combined text of the region's elements
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .map(|el| element_text(*el))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
