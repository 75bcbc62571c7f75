//! Page skeleton: hero, sections, headings, navigation and links.

use super::{Detector::*, Feature, FeatureContext, declares_schema_type, marked};
use crate::cta::BUTTON_LIKE_SELECTOR;
use crate::error::Result;
use crate::filter::{self, HrefTarget};
use crate::layout::LayoutGroup;
use crate::parsers::html;
use crate::parsers::text::word_count;
use crate::patterns;

pub const FEATURES: &[Feature] = &[
    Feature { name: "section_count", detector: Count(section_count) },
    Feature { name: "has_hero_section", detector: Flag(has_hero_section) },
    Feature { name: "hero_has_headline", detector: Flag(hero_has_headline) },
    Feature { name: "hero_has_image", detector: Flag(hero_has_image) },
    Feature { name: "hero_has_video", detector: Flag(hero_has_video) },
    Feature { name: "hero_has_cta", detector: Flag(hero_has_cta) },
    Feature { name: "hero_word_count", detector: Count(hero_word_count) },
    Feature { name: "word_count", detector: Count(total_word_count) },
    Feature { name: "main_content_word_count", detector: Count(main_content_word_count) },
    Feature { name: "heading_count", detector: Count(heading_count) },
    Feature { name: "h1_count", detector: Count(h1_count) },
    Feature { name: "h2_count", detector: Count(h2_count) },
    Feature { name: "h3_count", detector: Count(h3_count) },
    Feature { name: "paragraph_count", detector: Count(paragraph_count) },
    Feature { name: "list_count", detector: Count(list_count) },
    Feature { name: "list_item_count", detector: Count(list_item_count) },
    Feature { name: "has_navigation", detector: Flag(has_navigation) },
    Feature { name: "nav_link_count", detector: Count(nav_link_count) },
    Feature { name: "has_footer", detector: Flag(has_footer) },
    Feature { name: "footer_link_count", detector: Count(footer_link_count) },
    Feature { name: "has_sticky_header", detector: Flag(has_sticky_header) },
    Feature { name: "has_breadcrumbs", detector: Flag(has_breadcrumbs) },
    Feature { name: "has_sidebar", detector: Flag(has_sidebar) },
    Feature { name: "link_count", detector: Count(link_count) },
    Feature { name: "internal_link_count", detector: Count(internal_link_count) },
    Feature { name: "external_link_count", detector: Count(external_link_count) },
    Feature { name: "table_count", detector: Count(table_count) },
    Feature { name: "dom_element_count", detector: Count(dom_element_count) },
];

fn section_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(ctx.section_count)
}

fn has_hero_section(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(!ctx.hero.is_empty())
}

fn hero_has_headline(ctx: &FeatureContext<'_>) -> Result<bool> {
    ctx.hero.has("h1, h2")
}

fn hero_has_image(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(ctx.hero.has("img, picture")?
        || ctx.hero.elements().iter().any(|el| {
            html::attr_lower(*el, "style").contains("background-image")
        }))
}

fn hero_has_video(ctx: &FeatureContext<'_>) -> Result<bool> {
    ctx.hero.has(LayoutGroup::Video.selector())
}

fn hero_has_cta(ctx: &FeatureContext<'_>) -> Result<bool> {
    ctx.hero.has(BUTTON_LIKE_SELECTOR)
}

fn hero_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(word_count(&ctx.hero.text()))
}

fn total_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(word_count(&ctx.body_text))
}

fn main_content_word_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(word_count(&ctx.main.text()))
}

fn heading_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "h1, h2, h3, h4, h5, h6")
}

fn h1_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "h1")
}

fn h2_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "h2")
}

fn h3_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "h3")
}

fn paragraph_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(html::select_all(ctx.doc, "p")?
        .into_iter()
        .filter(|p| !html::element_text(*p).is_empty())
        .count())
}

fn list_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "ul, ol")
}

fn list_item_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "li")
}

fn has_navigation(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "nav, [role='navigation']")? > 0
        || !marked(ctx.doc, &patterns::NAVIGATION_CLASS)?.is_empty())
}

fn nav_link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let semantic = html::count(ctx.doc, "nav a[href], [role='navigation'] a[href]")?;
    let mut by_class = 0;
    for nav in super::innermost(marked(ctx.doc, &patterns::NAVIGATION_CLASS)?) {
        by_class += html::select_within(nav, "a[href]")?.len();
    }
    Ok(semantic.max(by_class))
}

fn footer_elements<'a>(ctx: &FeatureContext<'a>) -> Result<Vec<scraper::ElementRef<'a>>> {
    let semantic = html::select_all(ctx.doc, "footer, [role='contentinfo']")?;
    if !semantic.is_empty() {
        return Ok(semantic);
    }
    Ok(html::select_all(ctx.doc, "[class*='footer'], [id*='footer']")?)
}

fn has_footer(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(!footer_elements(ctx)?.is_empty())
}

fn footer_link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let mut total = 0;
    for footer in super::innermost(footer_elements(ctx)?) {
        total += html::select_within(footer, "a[href]")?.len();
    }
    Ok(total)
}

fn has_sticky_header(ctx: &FeatureContext<'_>) -> Result<bool> {
    for el in html::select_all(ctx.doc, "header, nav, [class*='header'], [id*='header']")? {
        let style: String = html::attr_lower(el, "style")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if style.contains("position:fixed") || style.contains("position:sticky") {
            return Ok(true);
        }
        if patterns::STICKY_CLASS.is_match(&html::class_and_id(el)) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn has_breadcrumbs(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(
        ctx.doc,
        "[class*='breadcrumb'], [id*='breadcrumb'], [aria-label*='breadcrumb'], [aria-label*='Breadcrumb']",
    )? > 0
        || html::count(ctx.doc, "[itemtype*='BreadcrumbList']")? > 0
        || declares_schema_type(ctx.doc, "BreadcrumbList")?)
}

fn has_sidebar(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "aside, [class*='sidebar'], [id*='sidebar']")? > 0)
}

fn link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "a[href]")
}

/// (internal, external) counts of followable links
fn link_split(ctx: &FeatureContext<'_>) -> Result<(usize, usize)> {
    let Some(base) = ctx.page_url.as_ref() else {
        return Ok((0, 0));
    };
    let mut internal = 0;
    let mut external = 0;
    for a in html::select_all(ctx.doc, "a[href]")? {
        match filter::classify_href(a.value().attr("href").unwrap_or_default(), base) {
            HrefTarget::Page(target) if filter::is_external(&target, base) => external += 1,
            HrefTarget::Page(_) | HrefTarget::SamePage => internal += 1,
            HrefTarget::NotFollowable => {}
        }
    }
    Ok((internal, external))
}

fn internal_link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(link_split(ctx)?.0)
}

fn external_link_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(link_split(ctx)?.1)
}

fn table_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "table")
}

fn dom_element_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, "*")
}
