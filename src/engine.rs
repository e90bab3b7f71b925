//=========================================================================
// Greedy Gardens Engine
//
// Main entry point and coordinator for the game runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(bootstrap)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns core thread
//         ├─ with_canvas_size()         runs platform
//         └─ with_skip_bootup() ...     blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{frame_slot, CoreEvent, PlatformEvent};
use crate::core::{BootstrapFn, CoreSystemsOrchestrator, StartupFn};
use crate::platform::Platform;
use crate::resources::Volumes;

//=== GameConfig ==========================================================

/// Runtime settings, fixed at build time.
///
/// Plain data, so it can be handed to the core thread which builds every
/// non-`Send` object from it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub title: String,
    pub tps: f64,
    pub channel_capacity: usize,
    pub canvas_size: (u32, u32),
    pub window_size: (u32, u32),
    pub fullscreen: bool,
    pub skip_bootup: bool,
    pub asset_root: PathBuf,
    pub volumes: Volumes,
    pub sound: bool,
    /// Fixed rng seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Greedy Gardens".to_string(),
            tps: 60.0,
            channel_capacity: 128,
            canvas_size: (1280, 720),
            window_size: (1280, 720),
            fullscreen: false,
            skip_bootup: false,
            asset_root: PathBuf::from("assets"),
            volumes: Volumes::default(),
            sound: true,
            seed: None,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (frame cap)
/// - **Channel capacity**: 128 events
/// - **Canvas**: 1280x720, window the same size
/// - **Assets**: `./assets`
///
/// # Examples
///
/// ```no_run
/// use greedy_gardens::EngineBuilder;
/// use greedy_gardens::game::{menu_bootstrap, menu_startup};
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_skip_bootup(true)
///     .with_startup(menu_startup)
///     .build()
///     .run(menu_bootstrap);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: GameConfig,
    startup: Option<StartupFn>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target ticks per second for the core thread. Each tick is
    /// one update and one rendered frame.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Sets the channel capacity for platform ↔ core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Sets the low-resolution canvas states render into.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Canvas size must be non-zero, got {}x{}", width, height);
        self.config.canvas_size = (width, height);
        self
    }

    /// Sets the initial window inner size. The canvas is scaled to fit.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.config.window_size = (width, height);
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    /// Jumps straight to the end of the intro sequence.
    pub fn with_skip_bootup(mut self, skip: bool) -> Self {
        self.config.skip_bootup = skip;
        self
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.asset_root = root.into();
        self
    }

    /// Sets channel volumes.
    ///
    /// # Panics
    ///
    /// Panics if any volume is outside `0.0..=1.0`.
    pub fn with_volumes(mut self, volumes: Volumes) -> Self {
        for v in [volumes.music, volumes.sfx, volumes.ambience] {
            assert!((0.0..=1.0).contains(&v), "Volume must be within 0..=1, got {}", v);
        }
        self.config.volumes = volumes;
        self
    }

    /// Disables audio output entirely when `false`.
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.config.sound = sound;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Runs `startup` once on the core thread before the first state is
    /// built. Root stack refills do not repeat it.
    pub fn with_startup(mut self, startup: StartupFn) -> Self {
        self.startup = Some(startup);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, canvas: {}x{})",
            self.config.tps,
            self.config.channel_capacity,
            self.config.canvas_size.0,
            self.config.canvas_size.1
        );

        Engine {
            config: self.config,
            startup: self.startup,
        }
    }
}

//=== Engine ==============================================================

/// Game runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Core Thread @ TPS)
///   │     └─► InputSystem, StateStack, Resources
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling, Presentation
///
/// Communication: crossbeam channels (PlatformEvent ⇄ CoreEvent)
/// ```
pub struct Engine {
    config: GameConfig,
    startup: Option<StartupFn>,
}

impl Engine {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core and core → platform channels, plus
    ///    the one-frame canvas slot
    /// 2. Spawns the core thread, which builds resources and pushes the
    ///    state returned by `bootstrap`
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → core
    ///    thread terminates
    pub fn run(self, bootstrap: BootstrapFn) {
        info!("Starting engine runtime (TPS: {})", self.config.tps);

        //--- 1. Create communication channels ----------------------------
        let (platform_tx, platform_rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.config.channel_capacity);
        let (core_tx, core_rx): (Sender<CoreEvent>, Receiver<CoreEvent>) =
            bounded(self.config.channel_capacity);
        let (frames, frame_rx) = frame_slot();

        info!("Channels created (capacity: {})", self.config.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let orchestrator =
            CoreSystemsOrchestrator::new(self.config.clone(), bootstrap).with_startup(self.startup);
        let core_handle = orchestrator.spawn_core_thread(platform_rx, core_tx, frames);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(&self.config, platform_tx, core_rx, frame_rx);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
