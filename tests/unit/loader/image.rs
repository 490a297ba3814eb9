use std::io::Cursor;

use super::*;
use crate::loader::fetch::StaticFetcher;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn env(fetcher: StaticFetcher) -> LoadEnv<StaticFetcher, crate::loader::fonts::FetchFontProbe<StaticFetcher>> {
    LoadEnv::with_fetched_fonts(fetcher, Url::parse("https://docs.example/guide/").unwrap())
}

#[test]
fn probe_reports_png_dimensions_and_format() {
    let (size, ext, mime) = probe_image(&png(8, 6)).unwrap();
    assert_eq!(size, Size::new(8.0, 6.0));
    assert_eq!(ext, "png");
    assert_eq!(mime, "image/png");
}

#[test]
fn probe_falls_back_to_svg() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30"/>"#;
    let (size, ext, mime) = probe_image(svg).unwrap();
    assert_eq!(size, Size::new(40.0, 30.0));
    assert_eq!(ext, "svg");
    assert_eq!(mime, "image/svg+xml");
}

#[test]
fn probe_rejects_unknown_bytes() {
    let err = probe_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, EmbedError::Load(_)));
}

#[test]
fn load_image_fetches_once_and_keeps_bytes() {
    let bytes = png(800, 600);
    let fetcher = StaticFetcher::new().with("https://docs.example/guide/shots/a.png", bytes.clone());
    let loaded = pollster::block_on(load_image(&env(fetcher), "shots/a.png")).unwrap();
    assert_eq!(loaded.url.as_str(), "https://docs.example/guide/shots/a.png");
    assert_eq!(loaded.natural, Size::new(800.0, 600.0));
    assert_eq!(loaded.bytes, bytes);
}

#[test]
fn load_image_maps_missing_and_corrupt_to_load_errors() {
    let fetcher = StaticFetcher::new().with("https://docs.example/guide/bad.png", vec![0x89, b'P', b'N', b'G']);
    let env = env(fetcher);
    let missing = pollster::block_on(load_image(&env, "none.png")).unwrap_err();
    assert!(matches!(missing, EmbedError::Load(_)));
    let corrupt = pollster::block_on(load_image(&env, "bad.png")).unwrap_err();
    assert!(matches!(corrupt, EmbedError::Load(_)));
}
