//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the core thread via crossbeam
// channels, and presents finished canvases through `pixels`.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  InputSystem     │
//  │   ├─ Converts Winit      │    │  ↓               │
//  │   └─ Maps cursor→canvas  │    │  StateStack      │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  render(canvas)  │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested         │        ↑        │
//  │   ├─ flush ──────────────┼────────┘        │
//  │   │        PlatformEvent                   │
//  │   └─ present ◄───────────┼─────────────────┘
//  │            FrameSlot + CoreEvent (Cursor/Title/Exit)
//  └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input is flushed and the newest
//   canvas presented on the same boundary
// - **Upscaling is the GPU's job**: `pixels` scales the low-resolution
//   canvas to the window, letterboxing as needed
// - **Graceful channel disconnect**: if the core thread dies, the window
//   closes on the `Exit` it sends on the way out
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorIcon, CustomCursor, CustomCursorSource, Fullscreen, Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::engine::GameConfig;
use crate::render::Surface;
use crate::resources::{CursorArt, CursorKind};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window, presenter and input event aggregator.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` - initializes subsystems
/// 2. **Execution**: `platform.run()` - starts event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window closed, or the core sends `Exit`
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// Canvas-sized pixel buffer bound to the window.
    pixels: Option<Pixels<'static>>,

    title: String,
    canvas_size: (u32, u32),
    window_size: (u32, u32),
    fullscreen: bool,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    event_sender: Sender<PlatformEvent>,
    core_receiver: Receiver<CoreEvent>,
    frame_receiver: Receiver<Surface>,

    /// Newest canvas not yet copied into the pixel buffer.
    pending_frame: Option<Surface>,
    cursor: CursorKind,

    /// Sprites received but not yet turned into OS cursors.
    pending_cursor_art: Vec<CursorArt>,
    custom_cursors: HashMap<CursorKind, CustomCursor>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub fn new(
        config: &GameConfig,
        event_sender: Sender<PlatformEvent>,
        core_receiver: Receiver<CoreEvent>,
        frame_receiver: Receiver<Surface>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            pixels: None,
            title: config.title.clone(),
            canvas_size: config.canvas_size,
            window_size: config.window_size,
            fullscreen: config.fullscreen,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            core_receiver,
            frame_receiver,
            pending_frame: None,
            cursor: CursorKind::Normal,
            pending_cursor_art: Vec::new(),
            custom_cursors: HashMap::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input events to the core thread.
    ///
    /// If the channel is disconnected (core thread exited early), logs a
    /// warning and drops the events so the window can still close normally.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Applies everything the core sent since the last boundary.
    ///
    /// Only the newest frame is kept. Returns `true` once the core asks
    /// for shutdown or its channel is gone.
    fn drain_core_events(&mut self) -> bool {
        if let Ok(frame) = self.frame_receiver.try_recv() {
            self.pending_frame = Some(frame);
        }

        loop {
            match self.core_receiver.try_recv() {
                Ok(CoreEvent::CursorArt(art)) => self.pending_cursor_art = art,
                Ok(CoreEvent::SetCursor(kind)) => {
                    self.cursor = kind;
                    self.apply_cursor();
                }
                Ok(CoreEvent::SetTitle(title)) => {
                    if let Some(window) = &self.window {
                        window.set_title(&title);
                    }
                    self.title = title;
                }
                Ok(CoreEvent::Exit) => {
                    info!(target: "platform", "Core requested exit");
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Core channel disconnected");
                    return true;
                }
            }
        }
    }

    /// Shows the current kind's sprite, or its system icon without one.
    fn apply_cursor(&self) {
        let Some(window) = &self.window else {
            return;
        };
        match self.custom_cursors.get(&self.cursor) {
            Some(cursor) => window.set_cursor(cursor.clone()),
            None => window.set_cursor(cursor_icon(self.cursor)),
        }
    }

    /// Turns received cursor sprites into OS cursors. Needs the event loop.
    fn install_cursor_art(&mut self, event_loop: &ActiveEventLoop) {
        if self.pending_cursor_art.is_empty() {
            return;
        }

        for art in mem::take(&mut self.pending_cursor_art) {
            match cursor_source(&art) {
                Ok(source) => {
                    let cursor = event_loop.create_custom_cursor(source);
                    self.custom_cursors.insert(art.kind, cursor);
                }
                Err(e) => warn!(target: "platform", "Cursor {:?} rejected: {}", art.kind, e),
            }
        }
        info!(target: "platform", "{} custom cursors installed", self.custom_cursors.len());
        self.apply_cursor();
    }

    /// Copies the pending frame into the pixel buffer and presents it.
    fn present(&mut self) -> Result<(), PlatformError> {
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };

        if let Some(frame) = self.pending_frame.take() {
            let target = pixels.frame_mut();
            if target.len() == frame.as_bytes().len() {
                target.copy_from_slice(frame.as_bytes());
            } else {
                warn!(
                    target: "platform",
                    "Frame size {:?} does not match canvas {:?}, skipped",
                    frame.size(),
                    self.canvas_size
                );
            }
        }

        pixels
            .render()
            .map_err(|e| PlatformError::Presentation(e.to_string()))
    }

    /// Maps a window position to canvas pixels, `None` when outside.
    fn to_canvas(&self, x: f64, y: f64) -> Option<(f32, f32)> {
        let pixels = self.pixels.as_ref()?;
        pixels
            .window_pos_to_pixel((x as f32, y as f32))
            .ok()
            .map(|(px, py)| (px as f32, py as f32))
    }

    fn create_presenter(&mut self, window: Arc<Window>) -> Result<(), PlatformError> {
        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(self.canvas_size.0, self.canvas_size.1, texture)
            .map_err(|e| PlatformError::Presentation(e.to_string()))?;
        self.pixels = Some(pixels);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

fn cursor_source(art: &CursorArt) -> Result<CustomCursorSource, String> {
    let (width, height) = art.image.size();
    let width = u16::try_from(width).map_err(|e| e.to_string())?;
    let height = u16::try_from(height).map_err(|e| e.to_string())?;
    let (hotspot_x, hotspot_y) = art.hotspot;

    CustomCursor::from_rgba(art.image.as_bytes().to_vec(), width, height, hotspot_x, hotspot_y)
        .map_err(|e| e.to_string())
}

fn cursor_icon(kind: CursorKind) -> CursorIcon {
    match kind {
        CursorKind::Normal => CursorIcon::Default,
        CursorKind::Hover => CursorIcon::Pointer,
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window and its pixel buffer if they don't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let mut attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.window_size.0, self.window_size.1))
            .with_min_inner_size(LogicalSize::new(self.canvas_size.0 / 4, self.canvas_size.1 / 4));
        if self.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.shutdown(event_loop);
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        if let Err(e) = self.create_presenter(window.clone()) {
            error!(target: "platform", "{}", e);
            self.shutdown(event_loop);
            return;
        }

        window.request_redraw();
        self.window = Some(window);
        self.apply_cursor();
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(pixels) = self.pixels.as_mut() {
                        if let Err(e) = pixels.resize_surface(size.width, size.height) {
                            error!(target: "platform", "Surface resize failed: {}", e);
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let canvas_pos = self.to_canvas(position.x, position.y);
                if let Some(event) = self.input_processor.process_cursor(canvas_pos) {
                    self.buffer.push_continuous(event);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(event) = self.input_processor.process_cursor(None) {
                    self.buffer.push_continuous(event);
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush input, take core output, present
                self.flush_input_buffer();

                if self.drain_core_events() {
                    event_loop.exit();
                    return;
                }
                self.install_cursor_art(event_loop);

                if let Err(e) = self.present() {
                    error!(target: "platform", "{}", e);
                    self.shutdown(event_loop);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
