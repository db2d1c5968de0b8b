use std::time::{Duration, Instant};

use collimate::{
    CalibrationProfile, CaptureConfig, CaptureSession, CircleList, CrosshairSpec, NokhwaBackend,
    OverlayOffset, enumerate_devices, frame_info, render, scene,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let devices = enumerate_devices()?;
    if devices.is_empty() {
        println!("No camera found");
        return Ok(());
    }
    for device in &devices {
        println!("[{}] {}", device.index, device);
    }

    let mut session = CaptureSession::new(NokhwaBackend);
    let receiver = session.frames();
    session.start(CaptureConfig::new(devices[0].index))?;

    let (width, height) = session.video_size();
    println!("Streaming: {} ({}x{})", devices[0].display_name, width, height);

    let mut profile = CalibrationProfile::default();
    profile.set_center_to_frame(width as f64, height as f64);
    let offset = OverlayOffset::default();
    let circles = CircleList::stock();
    let crosshair = CrosshairSpec::default();

    // Collect for a few seconds, keeping only the most recent frame.
    let deadline = Instant::now() + Duration::from_secs(3);
    let mut latest = None;
    while Instant::now() < deadline {
        if let Some(frame) = receiver.take() {
            latest = Some(frame);
        }
        std::thread::sleep(Duration::from_millis(15));
    }

    match latest {
        Some(frame) => {
            let scene = scene(
                &profile,
                offset,
                &crosshair,
                circles.circles(),
                frame.width as f64,
                frame.height as f64,
            );
            println!(
                "{}",
                frame_info(&profile, offset, frame.width as f64, frame.height as f64)
            );
            render::compose(&frame, &scene).save("live_overlay.png")?;
            println!("Wrote live_overlay.png");
        }
        None => println!("No frame received"),
    }

    session.stop();
    Ok(())
}
