//! Single-slot, most-recent-wins frame hand-off between the capture thread
//! and the consumer.
//!
//! There is no queue and no backpressure: publishing over an unconsumed frame
//! drops it, so the consumer always sees the latest frame and never a backlog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::frame::{Frame, NormalizedFrame};

struct Slot {
    latest: Mutex<Option<NormalizedFrame>>,
    published: AtomicU64,
    dropped: AtomicU64,
}

/// Producer half of the mailbox, held by the acquisition loop.
#[derive(Clone)]
pub struct FrameSink {
    slot: Arc<Slot>,
}

/// Consumer half of the mailbox. Intended for a single consumer; every frame
/// is delivered at most once.
#[derive(Clone)]
pub struct FrameReceiver {
    slot: Arc<Slot>,
}

impl FrameSink {
    /// Create a connected producer/consumer pair.
    pub fn pair() -> (FrameSink, FrameReceiver) {
        let slot = Arc::new(Slot {
            latest: Mutex::new(None),
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        });
        (
            FrameSink {
                slot: Arc::clone(&slot),
            },
            FrameReceiver { slot },
        )
    }

    /// Normalize `frame` and replace whatever the consumer has not yet taken.
    pub fn publish(&self, frame: &Frame) {
        let normalized = NormalizedFrame::from_frame(frame);
        let mut guard = self.slot.latest.lock().unwrap_or_else(|e| e.into_inner());
        if guard.replace(normalized).is_some() {
            let dropped = self.slot.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::trace!(dropped, "overwrote unconsumed frame");
        }
        self.slot.published.fetch_add(1, Ordering::Relaxed);
    }

    /// Total frames published since creation.
    pub fn frames_published(&self) -> u64 {
        self.slot.published.load(Ordering::Relaxed)
    }

    /// Frames overwritten before the consumer took them.
    pub fn frames_dropped(&self) -> u64 {
        self.slot.dropped.load(Ordering::Relaxed)
    }
}

impl FrameReceiver {
    /// Take the latest frame, if one arrived since the last take.
    pub fn take(&self) -> Option<NormalizedFrame> {
        self.slot
            .latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Frames overwritten before the consumer took them.
    pub fn frames_dropped(&self) -> u64 {
        self.slot.dropped.load(Ordering::Relaxed)
    }
}
