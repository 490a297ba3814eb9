use super::*;
use crate::loader::{bounds::BoundsSource, fetch::StaticFetcher};

const PAGE: &str = "https://docs.example/guide/index.html";

fn env(fetcher: StaticFetcher) -> LoadEnv<StaticFetcher, FetchFontProbe<StaticFetcher>> {
    LoadEnv::with_fetched_fonts(fetcher, Url::parse(PAGE).unwrap())
}

fn root_attr(markup: &str, name: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(markup).unwrap();
    doc.root_element().attribute(name).map(str::to_string)
}

#[test]
fn pipeline_sets_root_attributes_for_embedding() {
    let fetcher = StaticFetcher::new().with(
        "https://docs.example/guide/img/flow.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100" width="400"><g id="a"/><use href="#a"/></svg>"##,
    );
    let loaded = pollster::block_on(load_svg(&env(fetcher), "img/flow.svg", "my-svg-abc")).unwrap();

    assert_eq!(loaded.url.as_str(), "https://docs.example/guide/img/flow.svg");
    assert_eq!(loaded.bounds.source, BoundsSource::ViewBox);
    assert_eq!(loaded.bounds.rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(root_attr(&loaded.markup, "id").as_deref(), Some("my-svg-abc"));
    assert_eq!(root_attr(&loaded.markup, "viewBox").as_deref(), Some("0 0 200 100"));
    assert_eq!(root_attr(&loaded.markup, "width").as_deref(), Some("100%"));
    assert_eq!(root_attr(&loaded.markup, "height").as_deref(), Some("100%"));
    assert_eq!(
        root_attr(&loaded.markup, "preserveAspectRatio").as_deref(),
        Some("xMidYMid meet")
    );
    assert!(loaded.markup.contains(r##"href="#my-svg-abc-a""##));
    assert!(loaded.font_warnings.is_empty());
}

#[test]
fn measured_bounds_are_written_as_view_box() {
    let fetcher = StaticFetcher::new().with(
        "https://docs.example/guide/m.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="5" y="5" width="10" height="20"/></svg>"#,
    );
    let loaded = pollster::block_on(load_svg(&env(fetcher), "m.svg", "i")).unwrap();
    assert_eq!(loaded.bounds.source, BoundsSource::Measured);
    assert_eq!(root_attr(&loaded.markup, "viewBox").as_deref(), Some("-5 -5 30 40"));
}

#[test]
fn missing_fonts_are_tolerated() {
    let fetcher = StaticFetcher::new().with(
        "https://docs.example/guide/t.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
<style>@font-face { font-family: "Brand"; src: url(fonts/brand.woff2); }</style>
</svg>"#,
    );
    let loaded = pollster::block_on(load_svg(&env(fetcher), "t.svg", "i")).unwrap();
    assert_eq!(loaded.fonts_requested.len(), 1);
    assert_eq!(
        loaded.fonts_requested[0].sources[0].as_str(),
        "https://docs.example/guide/fonts/brand.woff2"
    );
    assert_eq!(loaded.font_warnings.len(), 1);
    assert_eq!(loaded.font_warnings[0].family, "Brand");
    assert_eq!(loaded.bounds.source, BoundsSource::Size);
}

#[test]
fn failures_map_to_the_error_taxonomy() {
    let fetcher = StaticFetcher::new()
        .with("https://docs.example/guide/bad.svg", "<svg")
        .with("https://docs.example/guide/html.svg", "<html/>")
        .with("https://docs.example/guide/bin.svg", vec![0xff_u8, 0xfe, 0x00]);
    let env = env(fetcher);

    let missing = pollster::block_on(load_svg(&env, "nope.svg", "i")).unwrap_err();
    assert!(matches!(missing, EmbedError::Load(_)));
    let bad = pollster::block_on(load_svg(&env, "bad.svg", "i")).unwrap_err();
    assert!(matches!(bad, EmbedError::Parse(_)));
    let html = pollster::block_on(load_svg(&env, "html.svg", "i")).unwrap_err();
    assert!(matches!(html, EmbedError::Parse(_)));
    let bin = pollster::block_on(load_svg(&env, "bin.svg", "i")).unwrap_err();
    assert!(matches!(bin, EmbedError::Parse(_)));
}

#[test]
fn markup_with_view_box_replaces_only_the_view_box() {
    let fetcher = StaticFetcher::new().with(
        "https://docs.example/guide/v.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"/>"#,
    );
    let loaded = pollster::block_on(load_svg(&env(fetcher), "v.svg", "i")).unwrap();
    let out = loaded
        .markup_with_view_box(Rect::new(20.0, 10.0, 180.0, 90.0))
        .unwrap();
    assert_eq!(root_attr(&out, "viewBox").as_deref(), Some("20 10 160 80"));
    assert_eq!(root_attr(&out, "id").as_deref(), Some("i"));
}

#[test]
fn inline_fonts_are_ready_before_text_is_measured() {
    use base64::Engine as _;

    let font = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/Tuffy.ttf")).unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(font);
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
<style>@font-face {{ font-family: "Inline"; src: url(data:font/ttf;base64,{encoded}) format("truetype"); }}</style>
<text x="0" y="40" font-family="Tuffy" font-size="40">Inline font</text>
</svg>"#
    );
    let fetcher = StaticFetcher::new().with("https://docs.example/guide/f.svg", svg);
    let loaded = pollster::block_on(load_svg(&env(fetcher), "f.svg", "i")).unwrap();

    assert_eq!(loaded.fonts_requested.len(), 1);
    assert!(loaded.font_warnings.is_empty());
    assert_eq!(loaded.bounds.source, BoundsSource::Measured);
    assert!(loaded.bounds.rect.width() > 100.0);
}
