//! DOM query facade over `scraper` plus plain-text statistics.

pub mod html;
pub mod text;

pub use html::Region;
pub use scraper::{ElementRef, Html};

/// Parses rendered page markup into a queryable document
pub fn parse_document(markup: &str) -> Html {
    let doc = Html::parse_document(markup);
    if !doc.errors.is_empty() {
        ::log::trace!("HTML parser recovered from {} errors", doc.errors.len());
    }
    doc
}
