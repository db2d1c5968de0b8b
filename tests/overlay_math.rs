use collimate::{
    CalibrationProfile, CircleList, CircleSpec, Color, CrosshairSpec, OverlayOffset, Point2f,
    frame_info, scene,
};

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn center_passes_through_when_base_matches_frame() {
    let profile = CalibrationProfile::new(1920.0, 1080.0, 812.25, 377.5);
    let offset = OverlayOffset::new(3.0, -2.5);
    let center = profile.overlay_center(offset, 1920.0, 1080.0);
    assert_close(center.x, 812.25 + 3.0);
    assert_close(center.y, 377.5 - 2.5);
}

#[test]
fn recalibration_centers_on_frame_regardless_of_prior_state() {
    let mut profile = CalibrationProfile::new(999.0, 1.0, -400.0, 7777.0);
    profile.set_center_to_frame(1280.0, 720.0);

    let offset = OverlayOffset::new(1.5, -1.5);
    let center = profile.overlay_center(offset, 1280.0, 720.0);
    assert_close(center.x, 640.0 + 1.5);
    assert_close(center.y, 360.0 - 1.5);
}

#[test]
fn recalibration_ignores_nonpositive_frames() {
    let mut profile = CalibrationProfile::new(3840.0, 2160.0, 100.0, 200.0);
    let before = profile;
    profile.set_center_to_frame(0.0, 1080.0);
    profile.set_center_to_frame(1920.0, -1.0);
    assert_eq!(profile, before);
}

#[test]
fn nonpositive_base_uses_unscaled_coordinates() {
    for (bw, bh) in [(0.0, 2160.0), (3840.0, 0.0), (-1.0, -1.0)] {
        let profile = CalibrationProfile::new(bw, bh, 150.0, 250.0);
        let center = profile.overlay_center(OverlayOffset::new(10.0, 20.0), 1920.0, 1080.0);
        assert!(center.x.is_finite() && center.y.is_finite());
        if bw <= 0.0 {
            assert_close(center.x, 160.0);
        }
        if bh <= 0.0 {
            assert_close(center.y, 270.0);
        }
    }
}

#[test]
fn calibration_survives_resolution_change() {
    // Calibrated at 4K, stream later negotiates 1080p.
    let profile = CalibrationProfile::new(3840.0, 2160.0, 1935.49, 1069.4);
    let offset = OverlayOffset::default();

    let center = profile.overlay_center(offset, 1920.0, 1080.0);
    assert_close(center.x, 967.745);
    assert_close(center.y, 534.7);

    let crosshair = CrosshairSpec {
        length: 900.0,
        ..Default::default()
    };
    let resolved = crosshair.endpoints(center);
    assert_close(resolved.horizontal.0.x, 517.745);
    assert_close(resolved.horizontal.1.x, 1417.745);
    assert_close(resolved.vertical.0.y, 84.7);
    assert_close(resolved.vertical.1.y, 984.7);
    // The arms stay centered on the overlay center.
    assert_close(resolved.horizontal.0.y, 534.7);
    assert_close(resolved.vertical.0.x, 967.745);
}

#[test]
fn stored_angle_is_ignored_unless_applied() {
    let spec = CrosshairSpec {
        angle_deg: 37.0,
        length: 100.0,
        apply_angle: false,
        ..Default::default()
    };
    let resolved = spec.endpoints(Point2f::new(50.0, 50.0));
    assert_close(resolved.horizontal.0.y, 50.0);
    assert_close(resolved.horizontal.1.y, 50.0);
    assert_close(resolved.vertical.0.x, 50.0);
    assert_close(resolved.vertical.1.x, 50.0);
}

#[test]
fn applied_right_angle_maps_horizontal_onto_vertical() {
    let spec = CrosshairSpec {
        angle_deg: 90.0,
        length: 200.0,
        apply_angle: true,
        ..Default::default()
    };
    let center = Point2f::new(0.0, 0.0);
    let resolved = spec.endpoints(center);
    // (-100, 0) rotated by 90 degrees lands on (0, -100).
    assert!((resolved.horizontal.0.x - 0.0).abs() < 1e-9);
    assert!((resolved.horizontal.0.y - -100.0).abs() < 1e-9);
    assert!((resolved.horizontal.1.y - 100.0).abs() < 1e-9);
}

#[test]
fn negative_length_collapses_to_center() {
    let spec = CrosshairSpec {
        length: -50.0,
        ..Default::default()
    };
    let center = Point2f::new(10.0, 20.0);
    let resolved = spec.endpoints(center);
    assert_close(resolved.horizontal.0.x, 10.0);
    assert_close(resolved.horizontal.1.x, 10.0);
    assert_close(resolved.vertical.0.y, 20.0);
    assert_close(resolved.vertical.1.y, 20.0);
}

#[test]
fn circle_radius_is_resolution_independent() {
    let profile = CalibrationProfile::new(3840.0, 2160.0, 1920.0, 1080.0);
    let offset = OverlayOffset::default();
    let crosshair = CrosshairSpec::default();
    let circles = [CircleSpec::new(600.0, Color::LIME, 2.0)];

    let at_4k = scene(&profile, offset, &crosshair, &circles, 3840.0, 2160.0);
    let at_1080p = scene(&profile, offset, &crosshair, &circles, 1920.0, 1080.0);

    // Radius stays fixed in pixels, only the center moves.
    assert_close(at_4k.circles[0].radius, 600.0);
    assert_close(at_1080p.circles[0].radius, 600.0);
    assert_close(at_4k.circles[0].center.x, 1920.0);
    assert_close(at_1080p.circles[0].center.x, 960.0);
}

#[test]
fn invisible_circles_are_not_placed() {
    let profile = CalibrationProfile::default();
    let mut hidden = CircleSpec::new(250.0, Color::LIME, 2.0);
    hidden.visible = false;
    let circles = [hidden, CircleSpec::new(600.0, Color::CYAN, 2.0)];
    let result = scene(
        &profile,
        OverlayOffset::default(),
        &CrosshairSpec::default(),
        &circles,
        1920.0,
        1080.0,
    );
    assert_eq!(result.circles.len(), 1);
    assert_close(result.circles[0].radius, 600.0);
}

#[test]
fn frame_info_reports_scaled_center_and_offset() {
    let profile = CalibrationProfile::new(3840.0, 2160.0, 1935.49, 1069.4);
    let info = frame_info(&profile, OverlayOffset::default(), 1920.0, 1080.0);
    assert_eq!(
        info,
        "Frame: 1920\u{d7}1080 | Center: (967.7, 534.7) | Offset: (+0.0, +0.0)"
    );
}

#[test]
fn stock_circle_list_matches_the_default_reticle() {
    let list = CircleList::stock();
    let radii: Vec<f64> = list.circles().iter().map(|c| c.radius).collect();
    assert_eq!(radii, vec![250.0, 600.0, 1100.0]);
    assert!(list.circles().iter().all(|c| c.color == Color::LIME));
    assert_eq!(list.selected_index(), Some(0));
}

#[test]
fn adding_a_circle_selects_it() {
    let mut list = CircleList::stock();
    list.add(CircleSpec::new(800.0, Color::LIME, 2.0));
    assert_eq!(list.selected_index(), Some(3));
    assert_eq!(list.selected().map(|c| c.radius), Some(800.0));
}

#[test]
fn removing_the_selected_circle_reselects_the_clamped_neighbor() {
    let mut list = CircleList::stock();

    // Removing the last entry moves selection back one.
    assert!(list.select(2));
    list.remove_selected();
    assert_eq!(list.selected_index(), Some(1));

    // Removing a middle entry keeps the same index.
    assert!(list.select(0));
    list.remove_selected();
    assert_eq!(list.selected_index(), Some(0));

    list.remove_selected();
    assert!(list.is_empty());
    assert_eq!(list.selected_index(), None);

    // Removal on an empty list is a no-op.
    list.remove_selected();
    assert!(list.is_empty());
}
