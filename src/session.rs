//! Capture session: device open, dedicated acquisition loop, manual controls

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::device::{CameraControl, CaptureBackend, CaptureConfig, CaptureDevice, ControlRange};
use crate::error::{CollimateError, Result};
use crate::sink::{FrameReceiver, FrameSink};

/// Fallback frame size when the driver reports none and no resolution was
/// requested.
pub const DEFAULT_FRAME_WIDTH: u32 = 2592;
pub const DEFAULT_FRAME_HEIGHT: u32 = 1944;

/// Pause between read attempts. Bounds CPU usage and caps the loop near
/// 100 fps regardless of device capability.
const READ_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    /// The acquisition loop hit a hard device error and stopped producing.
    Faulted(String),
}

enum DeviceCommand {
    SetControl(CameraControl, f64),
}

struct Worker {
    handle: JoinHandle<()>,
    cancel: Arc<AtomicBool>,
    commands: mpsc::Sender<DeviceCommand>,
}

/// Owns the device lifecycle and the background acquisition loop.
///
/// The device is opened, read and written exclusively on the loop thread;
/// control writes from the consumer side are funneled there as commands
/// applied between reads. [`CaptureSession::stop`] joins the loop, which
/// means the handle is guaranteed released before a new device is opened.
pub struct CaptureSession {
    backend: Arc<dyn CaptureBackend>,
    sink: FrameSink,
    receiver: FrameReceiver,
    status: Arc<Mutex<SessionStatus>>,
    worker: Option<Worker>,
    video_size: (u32, u32),
}

impl CaptureSession {
    pub fn new(backend: impl CaptureBackend + 'static) -> Self {
        let (sink, receiver) = FrameSink::pair();
        Self {
            backend: Arc::new(backend),
            sink,
            receiver,
            status: Arc::new(Mutex::new(SessionStatus::Idle)),
            worker: None,
            video_size: (0, 0),
        }
    }

    /// Consumer handle delivering the latest normalized frame. Stable across
    /// restarts of the session.
    pub fn frames(&self) -> FrameReceiver {
        self.receiver.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some() && self.status() == SessionStatus::Running
    }

    /// Frame size negotiated on the last successful start.
    pub fn video_size(&self) -> (u32, u32) {
        self.video_size
    }

    /// Stop any running session, then open `config` and start streaming.
    ///
    /// Fully synchronous: the previous device is released before the new
    /// open is attempted, and this does not return until the open outcome is
    /// known. On failure the session is left idle and the error carries the
    /// backend's reason; nothing escapes the capture thread as a panic.
    pub fn start(&mut self, config: CaptureConfig) -> Result<()> {
        self.stop();

        let cancel = Arc::new(AtomicBool::new(false));
        let (commands, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(u32, u32)>>();

        let spawn = thread::Builder::new().name("collimate-capture".into()).spawn({
            let backend = Arc::clone(&self.backend);
            let sink = self.sink.clone();
            let status = Arc::clone(&self.status);
            let cancel = Arc::clone(&cancel);
            move || {
                // The device lives and dies on this thread.
                let device = match backend.open(&config) {
                    Ok(device) => {
                        // Only this thread writes Running/Faulted.
                        *status.lock().unwrap_or_else(|e| e.into_inner()) = SessionStatus::Running;
                        let _ = ready_tx.send(Ok(device.resolution()));
                        device
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                acquisition_loop(device, sink, cancel, command_rx, status);
            }
        });
        let handle = match spawn {
            Ok(handle) => handle,
            Err(e) => {
                return Err(CollimateError::Other(format!(
                    "failed to spawn capture thread: {e}"
                )));
            }
        };

        let negotiated = match ready_rx.recv() {
            Ok(Ok(size)) => size,
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!(device = config.device_index, error = %e, "failed to open device");
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(CollimateError::Other(
                    "capture thread exited before reporting".into(),
                ));
            }
        };

        let (mut width, mut height) = negotiated;
        if width == 0 {
            width = config.requested_width.unwrap_or(DEFAULT_FRAME_WIDTH);
        }
        if height == 0 {
            height = config.requested_height.unwrap_or(DEFAULT_FRAME_HEIGHT);
        }
        self.video_size = (width, height);

        tracing::info!(device = config.device_index, width, height, "capture session started");
        self.worker = Some(Worker {
            handle,
            cancel,
            commands,
        });
        Ok(())
    }

    /// Idempotent. Signals cancellation and joins the acquisition loop; the
    /// device handle is dropped on the loop thread, so it is released by the
    /// time this returns.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.cancel.store(true, Ordering::Relaxed);
        drop(worker.commands);
        if worker.handle.join().is_err() {
            tracing::warn!("capture thread panicked");
        }
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = SessionStatus::Idle;
        tracing::info!("capture session stopped");
    }

    /// Forwarded to the open device via the acquisition thread; applied
    /// between frame reads. No-op when the session is not running.
    pub fn set_focus(&self, value: f64) {
        self.send_command(CameraControl::Focus, value);
    }

    /// See [`CaptureSession::set_focus`].
    pub fn set_exposure(&self, value: f64) {
        self.send_command(CameraControl::Exposure, value);
    }

    fn send_command(&self, control: CameraControl, value: f64) {
        if let Some(worker) = &self.worker {
            // After a loop fault the receiver is gone; dropping the command
            // matches the closed-device no-op contract.
            let _ = worker.commands.send(DeviceCommand::SetControl(control, value));
        }
    }

    /// Supported range for a control.
    ///
    /// This is a fixed per-control table, not true hardware introspection —
    /// a known limitation kept under test. A closed session reports
    /// (0, 100, 0) for everything.
    pub fn control_range(&self, control: CameraControl) -> ControlRange {
        if !self.is_running() {
            return ControlRange {
                min: 0.0,
                max: 100.0,
                default: 0.0,
            };
        }
        match control {
            CameraControl::Exposure => ControlRange {
                min: -13.0,
                max: -1.0,
                default: -5.0,
            },
            CameraControl::Focus => ControlRange {
                min: 0.0,
                max: 1024.0,
                default: 0.0,
            },
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn acquisition_loop(
    mut device: Box<dyn CaptureDevice>,
    sink: FrameSink,
    cancel: Arc<AtomicBool>,
    commands: mpsc::Receiver<DeviceCommand>,
    status: Arc<Mutex<SessionStatus>>,
) {
    while !cancel.load(Ordering::Relaxed) {
        while let Ok(DeviceCommand::SetControl(control, value)) = commands.try_recv() {
            if let Err(e) = device.set_control(control, value) {
                // A rejected slider value must not kill the stream.
                tracing::warn!(?control, value, error = %e, "device rejected control write");
            }
        }

        match device.read_frame() {
            Ok(Some(frame)) => sink.publish(&frame),
            Ok(None) => {} // empty read: retry next iteration
            Err(e) => {
                tracing::warn!(error = %e, "acquisition fault, stopping loop");
                *status.lock().unwrap_or_else(|p| p.into_inner()) =
                    SessionStatus::Faulted(e.to_string());
                return;
            }
        }

        thread::sleep(READ_INTERVAL);
    }
    // The device drops here, on the loop thread; `stop` joins before any
    // reopen, so the handle can never be raced by a new session.
}
