use std::io::Cursor;

use url::Url;

use super::*;
use crate::{
    foundation::core::Vec2,
    loader::fetch::StaticFetcher,
    transform::{directive::RenderDirective, zoom_pan::ZoomPan},
};

fn env() -> LoadEnv<StaticFetcher, crate::loader::fonts::FetchFontProbe<StaticFetcher>> {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::new(800, 600))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let fetcher = StaticFetcher::new()
        .with(
            "https://docs.example/d.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"/>"#,
        )
        .with("https://docs.example/p.png", png);
    LoadEnv::with_fetched_fonts(fetcher, Url::parse("https://docs.example/").unwrap())
}

#[test]
fn kinds_name_their_mount_attributes() {
    assert_eq!(EmbedKind::Svg.type_prefix(), "svg");
    assert_eq!(EmbedKind::Image.type_prefix(), "image");
    assert_eq!(EmbedKind::Svg.path_attribute(), "data-svg-path");
    assert_eq!(EmbedKind::Image.path_attribute(), "data-image-path");
    let cfg = EmbedConfig::default();
    assert_eq!(EmbedKind::Svg.default_title(&cfg), "Diagram");
    assert_eq!(EmbedKind::Image.default_title(&cfg), "Image");
}

#[test]
fn svg_content_builds_a_view_box_viewport() {
    let env = env();
    let content =
        pollster::block_on(load_content(&env, EmbedKind::Svg, "d.svg", "my-svg-1")).unwrap();
    assert_eq!(content.kind(), EmbedKind::Svg);
    assert_eq!(content.natural_rect(), Rect::new(0.0, 0.0, 200.0, 100.0));

    let vp = content.viewport(Size::new(400.0, 200.0), &env.config);
    assert_eq!(
        vp.directive(),
        RenderDirective::ViewBox(Rect::new(0.0, 0.0, 200.0, 100.0))
    );
    assert!(content.canvas_markup("my-svg-1", "t").starts_with("<svg id=\"my-svg-1\""));
}

#[test]
fn image_content_builds_a_clamped_transform_viewport() {
    let env = env();
    let content =
        pollster::block_on(load_content(&env, EmbedKind::Image, "p.png", "my-image-1")).unwrap();
    assert_eq!(content.kind(), EmbedKind::Image);
    assert_eq!(content.natural_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut vp = content.viewport(Size::new(400.0, 300.0), &env.config);
    vp.pan_by(Vec2::new(1000.0, 0.0));
    assert_eq!(
        vp.directive(),
        RenderDirective::CssTransform {
            translate: Vec2::new(200.0, 0.0),
            scale: 1.0
        }
    );

    let markup = content.canvas_markup("my-image-1", "A \"quoted\" title");
    assert!(markup.contains(r#"id="img-my-image-1""#));
    assert!(markup.contains(r#"src="https://docs.example/p.png""#));
    assert!(markup.contains("alt=\"A &quot;quoted&quot; title\""));
}
