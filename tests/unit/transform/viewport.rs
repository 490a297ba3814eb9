use super::*;

const EPS: f64 = 1e-9;

fn viewport(baseline: Rect) -> SvgViewport {
    SvgViewport::new(baseline, &EmbedConfig::default())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn log_scale_maps_percent_to_inverse_factor() {
    let scale = LogZoomScale::new(1.05);
    assert!(approx(scale.scroll_from_percent(100.0), 0.0));
    for p in [25.0, 50.0, 125.0, 600.0] {
        let f = scale.factor(scale.scroll_from_percent(p));
        assert!(approx(f, 100.0 / p), "factor for {p} was {f}");
    }
}

#[test]
fn construct_centers_on_baseline_at_100() {
    let vp = viewport(Rect::new(10.0, 20.0, 210.0, 120.0));
    let s = vp.state();
    assert_eq!(s.percent, 100.0);
    assert_eq!(s.origin, Point::new(10.0, 20.0));
    assert_eq!(s.extent, Size::new(200.0, 100.0));
    assert!(approx(s.log_scroll, 0.0));
}

#[test]
fn zoom_to_is_exact_and_clamped() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    for p in [25.0, 37.5, 100.0, 333.0, 600.0] {
        vp.zoom_to(p, false);
        assert_eq!(vp.percent(), p);
    }
    vp.zoom_to(1000.0, true);
    assert_eq!(vp.percent(), 600.0);
    vp.zoom_to(5.0, true);
    assert_eq!(vp.percent(), 25.0);
}

#[test]
fn zoom_by_steps_and_shrinks_extent_proportionally() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    assert!(vp.zoom_by(25.0));
    assert_eq!(vp.percent(), 125.0);
    assert!(vp.zoom_by(25.0));
    assert_eq!(vp.percent(), 150.0);

    let e = vp.state().extent;
    assert!(approx(e.width, 200.0 * 100.0 / 150.0));
    assert!(approx(e.height, 100.0 * 100.0 / 150.0));
}

#[test]
fn zoom_by_preserves_visible_center() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    vp.pan_by(Vec2::new(37.0, -12.0));
    let before = vp.visible_rect().center();
    vp.zoom_by(75.0);
    vp.zoom_by(-130.0);
    let after = vp.visible_rect().center();
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));
}

#[test]
fn zoom_by_noop_at_bounds() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    vp.zoom_to(600.0, true);
    let before = *vp.state();
    assert!(!vp.zoom_by(25.0));
    assert_eq!(*vp.state(), before);
}

#[test]
fn zoom_to_without_recenter_keeps_current_center() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    vp.pan_by(Vec2::new(50.0, 25.0));
    let before = vp.visible_rect().center();
    vp.zoom_to(200.0, false);
    let after = vp.visible_rect().center();
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));
}

#[test]
fn pan_is_unclamped_and_center_recovers() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    vp.zoom_by(100.0);
    vp.pan_by(Vec2::new(1.0e6, -1.0e6));
    assert!(vp.state().origin.x > 1.0e5);
    let percent = vp.percent();
    vp.center();
    assert_eq!(vp.percent(), percent);
    let c = vp.visible_rect().center();
    assert!(approx(c.x, 100.0));
    assert!(approx(c.y, 50.0));
}

#[test]
fn reset_is_idempotent() {
    let mut vp = viewport(Rect::new(-5.0, 3.0, 95.0, 83.0));
    vp.zoom_by(150.0);
    vp.pan_by(Vec2::new(13.0, 7.0));
    vp.reset();
    let first = *vp.state();
    vp.reset();
    assert_eq!(*vp.state(), first);
    assert_eq!(first.percent, 100.0);
    assert_eq!(first.origin, Point::new(-5.0, 3.0));
}

#[test]
fn screen_to_content_round_trips() {
    let mut vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    vp.zoom_by(50.0);
    vp.pan_by(Vec2::new(-20.0, 9.0));
    let screen_rect = Rect::new(30.0, 40.0, 430.0, 240.0);
    for screen in [
        Point::new(30.0, 40.0),
        Point::new(123.4, 201.7),
        Point::new(430.0, 240.0),
    ] {
        let content = vp.screen_to_content(screen, screen_rect).unwrap();
        let back = vp.content_to_screen(content, screen_rect).unwrap();
        assert!((back.x - screen.x).abs() < 1e-6);
        assert!((back.y - screen.y).abs() < 1e-6);
    }
}

#[test]
fn screen_to_content_maps_rect_corners_to_visible_window() {
    let vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    let screen_rect = Rect::new(0.0, 0.0, 400.0, 200.0);
    let tl = vp.screen_to_content(Point::new(0.0, 0.0), screen_rect).unwrap();
    let br = vp
        .screen_to_content(Point::new(400.0, 200.0), screen_rect)
        .unwrap();
    assert_eq!(tl, Point::new(0.0, 0.0));
    assert_eq!(br, Point::new(200.0, 100.0));
    assert!(vp.screen_to_content(Point::ZERO, Rect::ZERO).is_none());
}

#[test]
fn directive_and_readout() {
    let vp = viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(vp.directive().to_string(), "0 0 200 100");
    let label = vp
        .readout(Point::new(100.0, 50.0), Rect::new(0.0, 0.0, 400.0, 200.0))
        .unwrap();
    assert_eq!(label, "X: 50.0 Y: 25.0");
    assert_eq!(vp.units_per_pixel(Rect::new(0.0, 0.0, 400.0, 200.0)), Some(0.5));
}
