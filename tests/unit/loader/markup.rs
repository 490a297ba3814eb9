use super::*;

#[test]
fn apply_edits_orders_and_skips_overlaps() {
    let src = "abcdef";
    let out = apply_edits(
        src,
        vec![
            Edit::replace(4..5, "E"),
            Edit::insert(0, ">"),
            Edit::replace(1..3, "BC"),
            Edit::replace(2..4, "zz"),
        ],
    );
    assert_eq!(out, ">aBCdEf");
}

#[test]
fn set_root_attributes_replaces_inserts_and_removes() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" viewBox="0 0 1 1"><rect/></svg>"#;
    let out = set_root_attributes(
        src,
        &[
            ("width", Some("100%")),
            ("viewBox", None),
            ("id", Some("my-svg-1")),
        ],
    )
    .unwrap();
    assert_eq!(
        out,
        r#"<svg id="my-svg-1" xmlns="http://www.w3.org/2000/svg" width="100%" ><rect/></svg>"#
    );
}

#[test]
fn set_root_attributes_escapes_values() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
    let out = set_root_attributes(src, &[("data-title", Some(r#"a "b" & c"#))]).unwrap();
    assert!(out.contains(r#"data-title="a &quot;b&quot; &amp; c""#));
    parse_document(&out).unwrap();
}

#[test]
fn non_svg_root_is_a_parse_error() {
    let doc = parse_document("<html><svg/></html>").unwrap();
    assert!(matches!(svg_root(&doc), Err(EmbedError::Parse(_))));
    assert!(matches!(parse_document("<svg"), Err(EmbedError::Parse(_))));
}

#[test]
fn doctype_is_accepted() {
    let src = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"/>"#;
    let doc = parse_document(src).unwrap();
    svg_root(&doc).unwrap();
}

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn element_content_range_spans_children() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg"><style type="text/css">a > b {}</style><style/></svg>"#;
    let doc = parse_document(src).unwrap();
    let styles: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name(("http://www.w3.org/2000/svg", "style")))
        .collect();
    let range = element_content_range(src, styles[0]).unwrap();
    assert_eq!(&src[range], "a > b {}");
    assert_eq!(element_content_range(src, styles[1]), None);
}

#[test]
fn escape_text_keeps_quotes() {
    assert_eq!(escape_text(r#"font-family: "A&B" <x>"#), r#"font-family: "A&amp;B" &lt;x&gt;"#);
}
