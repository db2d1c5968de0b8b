use collimate::visualization::RerunVisualizer;
use collimate::{
    CalibrationProfile, CircleList, CrosshairSpec, Frame, NormalizedFrame, OverlayOffset,
    TestPattern, frame_info, scene,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let frame = Frame::test_pattern(1280, 720, TestPattern::Gradient);
    let normalized = NormalizedFrame::from_frame(&frame);

    let mut profile = CalibrationProfile::default();
    profile.set_center_to_frame(1280.0, 720.0);
    let offset = OverlayOffset::default();
    let circles = CircleList::stock();

    let scene = scene(
        &profile,
        offset,
        &CrosshairSpec::default(),
        circles.circles(),
        1280.0,
        720.0,
    );

    let viz = RerunVisualizer::new_with_file("collimate", "overlay.rrd")?;
    viz.log_frame("camera/frame", &normalized)?;
    viz.log_overlay("camera/overlay", &scene)?;
    viz.log_text("camera/info", &frame_info(&profile, offset, 1280.0, 720.0))?;

    println!("Wrote overlay.rrd - open it with the rerun viewer");
    Ok(())
}
