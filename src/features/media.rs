use super::{Detector::*, Feature, FeatureContext, marked};
use crate::error::Result;
use crate::layout::LayoutGroup;
use crate::parsers::html;
use crate::patterns;

pub const FEATURES: &[Feature] = &[
    Feature { name: "image_count", detector: Count(image_count) },
    Feature { name: "has_video", detector: Flag(has_video) },
    Feature { name: "video_count", detector: Count(video_count) },
    Feature { name: "icon_count", detector: Count(icon_count) },
    Feature { name: "has_carousel", detector: Flag(has_carousel) },
];

/// Images, not counting 1x1 tracking pixels
fn image_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    Ok(html::select_all(ctx.doc, "img")?
        .into_iter()
        .filter(|img| !(html::attr_lower(*img, "width") == "1" && html::attr_lower(*img, "height") == "1"))
        .count())
}

fn video_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    html::count(ctx.doc, LayoutGroup::Video.selector())
}

fn has_video(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(video_count(ctx)? > 0 || html::count(ctx.doc, "[data-video-id], [data-youtube-id], [class*='video-player']")? > 0)
}

fn icon_count(ctx: &FeatureContext<'_>) -> Result<usize> {
    let svgs = html::count(ctx.doc, "svg")?;
    let icon_fonts = html::count(
        ctx.doc,
        "i[class*='icon'], i[class*='fa-'], span[class*='icon'], img[class*='icon'], img[src*='icon']",
    )?;
    Ok(svgs.max(icon_fonts))
}

fn has_carousel(ctx: &FeatureContext<'_>) -> Result<bool> {
    Ok(html::count(ctx.doc, "[aria-roledescription='carousel'], [data-ride='carousel']")? > 0
        || !marked(ctx.doc, &patterns::CAROUSEL_CLASS)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::layout::LayoutMap;
    use scraper::Html;

    #[test]
    fn test_media_counts() {
        let doc = Html::parse_document(
            r#"<body><img src="a.png"><img src="px.gif" width="1" height="1">
            <iframe src="https://www.youtube.com/embed/xyz"></iframe>
            <svg></svg><svg></svg><i class="fa-solid fa-check"></i>
            <div class="swiper"><img src="b.png"></div></body>"#,
        );
        let layout = LayoutMap::default();
        let thresholds = Thresholds::default();
        let ctx = FeatureContext::new(&doc, "https://example.com/", &layout, &thresholds);

        assert_eq!(image_count(&ctx).unwrap(), 2);
        assert_eq!(video_count(&ctx).unwrap(), 1);
        assert!(has_video(&ctx).unwrap());
        assert_eq!(icon_count(&ctx).unwrap(), 2);
        assert!(has_carousel(&ctx).unwrap());
    }
}
