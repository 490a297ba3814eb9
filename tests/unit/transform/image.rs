use super::*;

fn landscape() -> ImageViewport {
    ImageViewport::new(
        Size::new(800.0, 600.0),
        Size::new(400.0, 300.0),
        &EmbedConfig::default(),
    )
}

#[test]
fn pan_is_clamped_to_half_the_overflow() {
    let mut vp = landscape();
    vp.pan_by(Vec2::new(1000.0, 0.0));
    assert_eq!(vp.pan(), Vec2::new(200.0, 0.0));
    assert_eq!(
        vp.directive().to_string(),
        "translate(200px, 0px) scale(1)"
    );

    vp.pan_by(Vec2::new(-5000.0, -5000.0));
    assert_eq!(vp.pan(), Vec2::new(-200.0, -150.0));
}

#[test]
fn small_images_cannot_pan() {
    let mut vp = ImageViewport::new(
        Size::new(100.0, 100.0),
        Size::new(400.0, 300.0),
        &EmbedConfig::default(),
    );
    vp.pan_by(Vec2::new(50.0, -50.0));
    assert_eq!(vp.pan(), Vec2::ZERO);
    assert_eq!(vp.max_pan(), Vec2::ZERO);
}

#[test]
fn zooming_out_reclamps_pan() {
    let mut vp = landscape();
    vp.zoom_by(100.0);
    vp.pan_by(Vec2::new(1000.0, 1000.0));
    assert_eq!(vp.pan(), Vec2::new(600.0, 450.0));

    vp.zoom_by(-100.0);
    assert_eq!(vp.percent(), 100.0);
    assert_eq!(vp.pan(), Vec2::new(200.0, 150.0));
}

#[test]
fn zoom_is_linear_and_clamped() {
    let mut vp = landscape();
    assert!(vp.zoom_by(25.0));
    assert_eq!(vp.percent(), 125.0);
    assert!(vp.zoom_by(10_000.0));
    assert_eq!(vp.percent(), 600.0);
    assert!(!vp.zoom_by(25.0));
    assert!(vp.zoom_by(-10_000.0));
    assert_eq!(vp.percent(), 25.0);
}

#[test]
fn reset_and_center() {
    let mut vp = landscape();
    vp.zoom_by(50.0);
    vp.pan_by(Vec2::new(30.0, 20.0));
    vp.center();
    assert_eq!(vp.pan(), Vec2::ZERO);
    assert_eq!(vp.percent(), 150.0);
    vp.reset();
    assert_eq!(vp.percent(), 100.0);
}

#[test]
fn canvas_resize_reclamps() {
    let mut vp = landscape();
    vp.pan_by(Vec2::new(1000.0, 0.0));
    vp.set_canvas(Size::new(700.0, 300.0));
    assert_eq!(vp.pan(), Vec2::new(50.0, 0.0));
}

#[test]
fn readout_maps_canvas_center_to_image_center() {
    let mut vp = landscape();
    let canvas = Rect::new(10.0, 10.0, 410.0, 310.0);
    assert_eq!(vp.readout(Point::new(210.0, 160.0), canvas), "X: 400 Y: 300");

    vp.zoom_by(100.0);
    let p = vp.screen_to_image(Point::new(310.0, 160.0), canvas);
    assert_eq!(p, Point::new(450.0, 300.0));
}
