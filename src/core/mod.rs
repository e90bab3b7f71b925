//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for everything running on the logic (non-platform)
// thread.
//
// Responsibilities:
// - Build the resources and systems that must stay on this thread
// - Receive platform events and fold them into input state
// - Run one update + render per tick at a fixed rate (the FPS cap)
// - Send finished canvases, title and cursor changes back to the platform
//
// Notes:
// The platform thread never sees a game object. Both directions carry
// plain messages over bounded crossbeam channels; canvases go through a
// one-frame slot of their own.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod globals;
pub mod input;
pub mod platform_bridge;
pub mod spawner;
pub mod state;
pub mod tween;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Modules ====================================================

use crate::engine::GameConfig;
use crate::error::GameError;
use crate::resources::{
    load_cursor_art, AudioProvider, ChannelCursor, FsAssets, Resources, SilentAudio,
};
use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{CoreEvent, EventCollector, FrameSlot, PlatformEvent, TickControl};
use state::State;

//=== Public API ==========================================================

/// Builds the first state of the root stack. Plain function pointer so it
/// can cross into the core thread.
pub type BootstrapFn = fn(&GameConfig, &mut Resources) -> Result<Box<dyn State>, GameError>;

/// One-time setup on the core thread, run after resources exist and
/// before the first bootstrap.
pub type StartupFn = fn(&GameConfig, &mut Resources);

/// Upper bound on a single frame's `dt`, in seconds.
pub const MAX_FRAME_DT: f32 = 0.25;

//=== CoreSystemsOrchestrator =============================================

/// Owns the configuration needed to start the core thread.
pub(crate) struct CoreSystemsOrchestrator {
    config: GameConfig,
    bootstrap: BootstrapFn,
    startup: Option<StartupFn>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(config: GameConfig, bootstrap: BootstrapFn) -> Self {
        Self {
            config,
            bootstrap,
            startup: None,
        }
    }

    pub fn with_startup(mut self, startup: Option<StartupFn>) -> Self {
        self.startup = startup;
        self
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events
    //  2. Updates the root stack (bootstrapping it if empty)
    //  3. Renders and ships the canvas
    //  4. Sleeps to maintain fixed pacing
    //
    // The platform is told to exit however the loop ends.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        sender: Sender<CoreEvent>,
        frames: FrameSlot,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            if let Err(e) = self.run(receiver, &sender, &frames) {
                error!(target: "core", "Core loop stopped: {}", e);
            }
            info!(target: "core", "Core thread exiting.");
            let _ = sender.send(CoreEvent::Exit);
        })
    }

    fn run(
        self,
        receiver: Receiver<PlatformEvent>,
        sender: &Sender<CoreEvent>,
        frames: &FrameSlot,
    ) -> Result<(), GameError> {
        let Self {
            config,
            bootstrap,
            startup,
        } = self;
        let frame_duration = Duration::from_secs_f64(1.0 / config.tps);

        let mut resources = build_resources(&config, sender.clone());
        send_cursor_art(&resources, sender);
        if let Some(startup) = startup {
            debug!(target: "core", "Running startup hook");
            startup(&config, &mut resources);
        }
        let mut context = GlobalContext::new(resources);
        let boot_config = config.clone();
        let mut systems = GlobalSystems::new(Box::new(move |resources: &mut Resources| {
            bootstrap(&boot_config, resources)
        }));
        let mut collector = EventCollector::new(receiver);
        let mut fps = FpsCounter::new();
        let mut last_tick = Instant::now();

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ----------------------------
            if collector.collect_frame() == TickControl::Exit {
                info!(target: "core", "Platform requested shutdown");
                return Ok(());
            }

            //--- Step 2: Update ---------------------------------------------
            let dt = frame_dt(frame_start.duration_since(last_tick));
            last_tick = frame_start;
            systems.update(&mut context, collector.batches(), dt)?;

            if context.resources.quit_requested() {
                return Ok(());
            }

            //--- Step 3: Render and present ----------------------------------
            systems.render(&mut context);
            frames.publish(context.canvas.clone());

            if let Some(rate) = fps.tick(frame_start) {
                let title = format!("{} ({} FPS)", config.title, rate);
                if sender.try_send(CoreEvent::SetTitle(title)).is_err() {
                    trace!(target: "core", "Title update dropped");
                }
            }

            //--- Step 4: Maintain deterministic pacing ------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
    }
}

//--- Helpers -------------------------------------------------------------

fn frame_dt(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().min(MAX_FRAME_DT)
}

fn send_cursor_art(resources: &Resources, sender: &Sender<CoreEvent>) {
    let art = load_cursor_art(resources.assets());
    if art.is_empty() {
        return;
    }
    debug!(target: "core", "Sending {} cursor sprites", art.len());
    if sender.try_send(CoreEvent::CursorArt(art)).is_err() {
        warn!(target: "core", "Cursor sprites not delivered, keeping system cursors");
    }
}

fn build_resources(config: &GameConfig, sender: Sender<CoreEvent>) -> Resources {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Resources::new(
        config.canvas_size,
        Box::new(FsAssets::new(&config.asset_root)),
        open_audio(config),
        Box::new(ChannelCursor::new(sender)),
        rng,
    )
}

#[cfg(feature = "sound")]
fn open_audio(config: &GameConfig) -> Box<dyn AudioProvider> {
    use crate::resources::RodioAudio;

    if config.sound {
        match RodioAudio::new(&config.asset_root, config.volumes) {
            Ok(audio) => return Box::new(audio),
            Err(e) => warn!(target: "audio", "{}, continuing without sound", e),
        }
    }
    Box::new(SilentAudio::new(config.volumes))
}

#[cfg(not(feature = "sound"))]
fn open_audio(config: &GameConfig) -> Box<dyn AudioProvider> {
    if config.sound {
        warn!(target: "audio", "Built without the `sound` feature, continuing without sound");
    }
    Box::new(SilentAudio::new(config.volumes))
}

//=== FpsCounter ==========================================================

/// Counts ticks and reports a whole-number rate about once a second.
pub(crate) struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
        }
    }

    /// Records one tick at `now`. Returns the rate when a window closes.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.duration_since(start);
        if elapsed < Self::WINDOW {
            return None;
        }

        let rate = (f64::from(self.frames) / elapsed.as_secs_f64()).round() as u32;
        self.window_start = Some(now);
        self.frames = 0;
        Some(rate)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::state::StateContext;
    use crate::render::{Surface, WHITE};
    use crate::resources::MemoryAssets;
    use crossbeam_channel::bounded;
    use platform_bridge::frame_slot;

    //--- Test Helpers -----------------------------------------------------

    /// Requests quit on Escape.
    struct Idle;

    impl State for Idle {
        fn update(&mut self, ctx: &mut StateContext, _dt: f32) {
            if ctx.input.is_key_pressed(KeyCode::Escape) {
                ctx.resources.request_quit();
            }
        }

        fn render(&self, _target: &mut Surface, _resources: &Resources) {}

        fn name(&self) -> &'static str {
            "Idle"
        }
    }

    fn idle(_: &GameConfig, _: &mut Resources) -> Result<Box<dyn State>, GameError> {
        Ok(Box::new(Idle))
    }

    fn failing(_: &GameConfig, _: &mut Resources) -> Result<Box<dyn State>, GameError> {
        Err(GameError::Bootstrap("test".into()))
    }

    fn headless_config() -> GameConfig {
        GameConfig {
            tps: 1000.0,
            canvas_size: (8, 8),
            sound: false,
            seed: Some(1),
            ..GameConfig::default()
        }
    }

    //=====================================================================
    // Core Loop Tests
    //=====================================================================

    #[test]
    fn window_close_stops_core_and_signals_exit() {
        let (platform_tx, platform_rx) = bounded(8);
        let (core_tx, core_rx) = bounded(64);
        let (slot, _frames) = frame_slot();

        platform_tx.send(PlatformEvent::WindowClosed).unwrap();
        let handle = CoreSystemsOrchestrator::new(headless_config(), idle)
            .spawn_core_thread(platform_rx, core_tx, slot);
        handle.join().unwrap();

        let events: Vec<_> = core_rx.try_iter().collect();
        assert!(matches!(events.last(), Some(CoreEvent::Exit)));
    }

    #[test]
    fn quit_request_ends_loop_after_frames() {
        let (platform_tx, platform_rx) = bounded(8);
        let (core_tx, core_rx) = bounded(1024);
        let (slot, frames) = frame_slot();

        let handle = CoreSystemsOrchestrator::new(headless_config(), idle)
            .spawn_core_thread(platform_rx, core_tx, slot);

        // Let a frame through, then ask the state to quit
        let first = frames.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.size(), (8, 8));

        platform_tx
            .send(PlatformEvent::Inputs {
                discrete: vec![InputEvent::KeyDown { key: KeyCode::Escape }],
                continuous: vec![],
            })
            .unwrap();
        handle.join().unwrap();

        let rest: Vec<_> = core_rx.try_iter().collect();
        assert!(matches!(rest.last(), Some(CoreEvent::Exit)));
    }

    #[test]
    fn unpresented_frames_do_not_queue_up() {
        let (platform_tx, platform_rx) = bounded(8);
        let (core_tx, _core_rx) = bounded(1024);
        let (slot, frames) = frame_slot();

        let handle = CoreSystemsOrchestrator::new(headless_config(), idle)
            .spawn_core_thread(platform_rx, core_tx, slot);

        // Platform never presents while the core ticks at 1000 TPS
        thread::sleep(Duration::from_millis(100));
        assert!(frames.len() <= 1);

        platform_tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();
        assert!(frames.len() <= 1);
    }

    #[test]
    fn bootstrap_failure_still_signals_exit() {
        let (_platform_tx, platform_rx) = bounded(8);
        let (core_tx, core_rx) = bounded(8);
        let (slot, frames) = frame_slot();

        CoreSystemsOrchestrator::new(headless_config(), failing)
            .spawn_core_thread(platform_rx, core_tx, slot)
            .join()
            .unwrap();

        let events: Vec<_> = core_rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CoreEvent::Exit));
        assert!(frames.is_empty());
    }

    #[test]
    fn cursor_art_is_sent_only_when_loaded() {
        let (tx, rx) = bounded(4);

        send_cursor_art(&Resources::headless(8, 8), &tx);
        assert!(rx.try_recv().is_err());

        let (w, h) = crate::resources::cursor::CURSOR_FRAME_SIZE;
        let assets = MemoryAssets::new()
            .with(crate::resources::cursor::CURSOR_SHEET_FILE, Surface::filled(w * 2, h, WHITE));
        send_cursor_art(&Resources::headless_with(8, 8, assets), &tx);
        assert!(matches!(rx.try_recv(), Ok(CoreEvent::CursorArt(ref art)) if art.len() == 2));
    }

    #[test]
    fn startup_runs_once_across_rebootstraps() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static STARTS: AtomicUsize = AtomicUsize::new(0);
        fn count_start(_: &GameConfig, _: &mut Resources) {
            STARTS.fetch_add(1, Ordering::SeqCst);
        }

        /// Pops itself every frame so the root stack keeps refilling.
        struct Fleeting;

        impl State for Fleeting {
            fn update(&mut self, ctx: &mut StateContext, _dt: f32) {
                ctx.transitions.pop_state();
            }

            fn render(&self, _target: &mut Surface, _resources: &Resources) {}

            fn name(&self) -> &'static str {
                "Fleeting"
            }
        }

        fn fleeting(_: &GameConfig, _: &mut Resources) -> Result<Box<dyn State>, GameError> {
            Ok(Box::new(Fleeting))
        }

        let (platform_tx, platform_rx) = bounded(8);
        let (core_tx, _core_rx) = bounded(1024);
        let (slot, frames) = frame_slot();

        let handle = CoreSystemsOrchestrator::new(headless_config(), fleeting)
            .with_startup(Some(count_start))
            .spawn_core_thread(platform_rx, core_tx, slot);

        for _ in 0..5 {
            frames.recv_timeout(Duration::from_secs(5)).unwrap();
        }
        platform_tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();

        assert_eq!(STARTS.load(Ordering::SeqCst), 1);
    }

    //=====================================================================
    // Pacing Tests
    //=====================================================================

    #[test]
    fn dt_is_capped() {
        assert_eq!(frame_dt(Duration::from_secs(3)), MAX_FRAME_DT);
        assert!((frame_dt(Duration::from_millis(16)) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn fps_counter_reports_once_per_window() {
        let mut fps = FpsCounter::new();
        let t0 = Instant::now();

        for i in 0..60 {
            assert_eq!(fps.tick(t0 + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(fps.tick(t0 + Duration::from_millis(1000)), Some(61));
        assert_eq!(fps.tick(t0 + Duration::from_millis(1016)), None);
    }
}
