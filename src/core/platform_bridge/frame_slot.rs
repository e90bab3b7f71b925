//=========================================================================
// Frame Slot
//=========================================================================
//
// Single-frame mailbox from the core thread to the platform.
//
// Architecture:
//   FrameSlot::publish(canvas) → bounded(1) → Receiver<Surface> (platform)
//
// A canvas is megabytes, so at most one waits for presentation. When the
// platform has not picked up the previous frame (minimized, occluded),
// publishing evicts it and the newest frame takes its place.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;

//=== Internal Dependencies ===============================================

use crate::render::Surface;

//=== FrameSlot ===========================================================

/// Core-side handle of the frame mailbox.
pub(crate) struct FrameSlot {
    sender: Sender<Surface>,
    /// Core-held receiver used only to evict a stale frame.
    stale: Receiver<Surface>,
}

/// Creates the mailbox. The receiver goes to the platform thread.
pub(crate) fn frame_slot() -> (FrameSlot, Receiver<Surface>) {
    let (sender, receiver) = bounded(1);
    let slot = FrameSlot {
        sender,
        stale: receiver.clone(),
    };
    (slot, receiver)
}

impl FrameSlot {
    /// Offers `frame` to the platform, replacing any frame still waiting.
    pub(crate) fn publish(&self, frame: Surface) {
        let frame = match self.sender.try_send(frame) {
            Ok(()) => return,
            Err(TrySendError::Full(frame)) => frame,
            Err(TrySendError::Disconnected(_)) => return,
        };

        // Platform may have taken it meanwhile; either way the slot is free
        if self.stale.try_recv().is_ok() {
            trace!(target: "core", "Platform behind, stale frame replaced");
        }
        if self.sender.try_send(frame).is_err() {
            trace!(target: "core", "Frame slot busy, frame dropped");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_receives_published_frame() {
        let (slot, rx) = frame_slot();
        slot.publish(Surface::new(3, 2));

        assert_eq!(rx.try_recv().map(|f| f.size()).ok(), Some((3, 2)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unread_frames_never_pile_up() {
        let (slot, rx) = frame_slot();

        for i in 1..=200 {
            slot.publish(Surface::new(i, 1));
        }

        assert_eq!(rx.len(), 1);
        assert_eq!(rx.try_recv().map(|f| f.size()).ok(), Some((200, 1)));
    }

    #[test]
    fn publish_after_platform_is_gone_is_harmless() {
        let (slot, rx) = frame_slot();
        drop(rx);

        slot.publish(Surface::new(1, 1));
        slot.publish(Surface::new(2, 2));
    }
}
