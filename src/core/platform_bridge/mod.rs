//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the winit platform thread with the core logic thread.
//
// The two threads share nothing but these messages, so no game object
// ever needs to be `Send`.
//
// Components:
// - `interface`: event types and error definitions (the contract)
// - `event_collector`: core-side event collection and buffering
// - `frame_slot`: latest-only canvas handoff to the platform
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod frame_slot;
pub mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use frame_slot::{frame_slot, FrameSlot};
pub use interface::{CoreEvent, PlatformError, PlatformEvent};
