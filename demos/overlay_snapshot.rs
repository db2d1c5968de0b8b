use collimate::{
    CalibrationProfile, CircleList, CrosshairSpec, Frame, NormalizedFrame, OverlayOffset,
    TestPattern, frame_info, render, scene,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let frame = Frame::test_pattern(1920, 1080, TestPattern::Checkerboard);
    let normalized = NormalizedFrame::from_frame(&frame);

    let mut profile = CalibrationProfile::default();
    profile.set_center_to_frame(1920.0, 1080.0);
    let offset = OverlayOffset::new(12.0, -8.0);
    let circles = CircleList::stock();
    let crosshair = CrosshairSpec::default();

    let scene = scene(
        &profile,
        offset,
        &crosshair,
        circles.circles(),
        normalized.width as f64,
        normalized.height as f64,
    );
    println!(
        "{}",
        frame_info(&profile, offset, normalized.width as f64, normalized.height as f64)
    );

    let img = render::compose(&normalized, &scene);
    img.save("overlay_snapshot.png")?;
    println!("Wrote overlay_snapshot.png");
    Ok(())
}
