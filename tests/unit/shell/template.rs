use rand::{SeedableRng, rngs::StdRng};

use super::*;

#[test]
fn instance_ids_have_a_nine_char_base36_suffix() {
    let mut rng = StdRng::seed_from_u64(7);
    let id = instance_id(EmbedKind::Svg, &mut rng);
    let suffix = id.strip_prefix("my-svg-").unwrap();
    assert_eq!(suffix.len(), 9);
    assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));

    let img = new_instance_id(EmbedKind::Image);
    assert!(img.starts_with("my-image-"));
    assert_eq!(img.len(), "my-image-".len() + 9);
}

#[test]
fn element_ids_follow_the_naming_scheme() {
    let ids = ElementIds::new(EmbedKind::Svg, "my-svg-abc");
    assert_eq!(ids.container, "svg-container-my-svg-abc");
    assert_eq!(ids.canvas, "canvas-area-my-svg-abc");
    assert_eq!(ids.zoom_label, "svg-zoom-label-my-svg-abc");
    assert_eq!(ids.coord_display, "svg-coord-display-my-svg-abc");
    assert_eq!(ids.button(ToolbarAction::ZoomIn), "btn-svg-zoom-in-my-svg-abc");
    assert_eq!(
        ids.button(ToolbarAction::ToggleFullscreen),
        "btn-svg-fullscreen-my-svg-abc"
    );

    for action in ToolbarAction::ALL {
        assert_eq!(ids.action_for_button(&ids.button(action)), Some(action));
    }
    assert_eq!(ids.action_for_button("btn-image-reset-my-svg-abc"), None);
    assert_eq!(ids.action_for_button("btn-svg-reset-other"), None);
}

#[test]
fn style_block_is_specialized_per_instance() {
    let ids = ElementIds::new(EmbedKind::Image, "my-image-xyz");
    let css = style_block(&ids);
    assert!(!css.contains("__TYPE__"));
    assert!(!css.contains("__ID__"));
    assert!(css.contains("#image-container-my-image-xyz"));
    assert!(css.contains("#image-zoom-label-my-image-xyz"));
    assert!(css.starts_with("<style>"));
}

#[test]
fn container_escapes_the_title_and_lists_every_button() {
    let ids = ElementIds::new(EmbedKind::Svg, "i1");
    let html = widget_html(&ids, "<Flow> & more", "<svg/>");
    assert!(html.contains("&lt;Flow&gt; &amp; more"));
    assert!(html.contains(r#"<div id="canvas-area-i1" class="embed-canvas"><svg/></div>"#));
    assert!(html.contains(r#"<span id="svg-zoom-label-i1">100%</span>"#));
    assert!(html.contains(ICON_FONT_LINK));
    for action in ToolbarAction::ALL {
        assert!(html.contains(&format!(r#"id="{}""#, ids.button(action))));
    }
}

#[test]
fn error_markup_is_escaped() {
    assert_eq!(
        error_html("bad <svg>"),
        "<p style='color: red;'>bad &lt;svg&gt;</p>"
    );
}
