//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the platform → core channel once per tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches + TickControl
//
// At most MAX_EVENTS_PER_FRAME messages are taken per tick; the rest wait
// for the next one. An empty queue returns at once since the core loop
// does its own pacing.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Whether the core loop should run this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            batches: Vec::new(),
        }
    }

    /// Replaces last tick's batches with whatever is pending now.
    ///
    /// Returns [`TickControl::Exit`] on window close or when the platform
    /// side of the channel is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.batches.clear();

        for _ in 0..Self::MAX_EVENTS_PER_FRAME {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => return TickControl::Continue,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
            };

            match event {
                PlatformEvent::Inputs { discrete, continuous } => {
                    let batches = [discrete, continuous].into_iter().filter(|b| !b.is_empty());
                    self.batches.extend(batches);
                }
                PlatformEvent::WindowClosed => {
                    info!(target: "core", "Window closed");
                    return TickControl::Exit;
                }
            }
        }

        if !self.receiver.is_empty() {
            warn!(
                target: "core",
                "Platform backlog: {} messages left for next tick",
                self.receiver.len()
            );
        }
        TickControl::Continue
    }

    /// Input batches gathered by the last [`collect_frame`](Self::collect_frame).
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
