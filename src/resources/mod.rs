//=========================================================================
// Resources
//=========================================================================
//
// Shared collaborators lent to every state by reference.
//
// Components:
// - assets: image and sprite-sheet loading
// - audio:  music and sound channels
// - cursor: OS cursor selection
//
// `Resources` lives on the core thread and is never sent across threads;
// the providers it owns need not be `Send`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod audio;
pub mod cursor;

//=== Public API ==========================================================

pub use assets::{
    AssetError, AssetProvider, FsAssets, LoadMode, MemoryAssets, SpriteRect, SpriteSheet,
};
pub use audio::{AudioChannel, AudioError, AudioProvider, SilentAudio, Volumes};
pub use cursor::{
    load_cursor_art, ChannelCursor, CursorArt, CursorKind, CursorProvider, RecordingCursor,
};

#[cfg(feature = "sound")]
pub use audio::RodioAudio;

//=== External Dependencies ===============================================

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Resources ===========================================================

pub struct Resources {
    canvas_size: (u32, u32),
    assets: Box<dyn AssetProvider>,
    audio: Box<dyn AudioProvider>,
    cursor: Box<dyn CursorProvider>,
    rng: StdRng,
    quit_requested: bool,
}

impl Resources {
    pub fn new(
        canvas_size: (u32, u32),
        assets: Box<dyn AssetProvider>,
        audio: Box<dyn AudioProvider>,
        cursor: Box<dyn CursorProvider>,
        rng: StdRng,
    ) -> Self {
        Self {
            canvas_size,
            assets,
            audio,
            cursor,
            rng,
            quit_requested: false,
        }
    }

    /// No window, no sound, no files. Deterministic rng.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::headless_with(width, height, MemoryAssets::new())
    }

    /// Like [`headless`](Self::headless) with preloaded images.
    pub fn headless_with(width: u32, height: u32, assets: MemoryAssets) -> Self {
        Self::new(
            (width, height),
            Box::new(assets),
            Box::new(SilentAudio::default()),
            Box::new(RecordingCursor::new()),
            StdRng::seed_from_u64(0),
        )
    }

    //--- Canvas -----------------------------------------------------------

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_size.0
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_size.1
    }

    //--- Collaborators ----------------------------------------------------

    pub fn assets(&self) -> &dyn AssetProvider {
        self.assets.as_ref()
    }

    pub fn audio(&self) -> &dyn AudioProvider {
        self.audio.as_ref()
    }

    pub fn audio_mut(&mut self) -> &mut dyn AudioProvider {
        self.audio.as_mut()
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursor.current()
    }

    pub fn set_cursor(&mut self, kind: CursorKind) {
        self.cursor.set_cursor(kind);
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    //--- Shutdown ---------------------------------------------------------

    /// Asks the core loop to stop after the current frame.
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            info!(target: "core", "Quit requested");
        }
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_defaults() {
        let resources = Resources::headless(320, 180);

        assert_eq!(resources.canvas_size(), (320, 180));
        assert_eq!(resources.cursor(), CursorKind::Normal);
        assert_eq!(resources.audio().current_music(), None);
        assert!(!resources.quit_requested());
    }

    #[test]
    fn quit_request_sticks() {
        let mut resources = Resources::headless(8, 8);
        resources.request_quit();
        resources.request_quit();
        assert!(resources.quit_requested());
    }

    #[test]
    fn headless_rng_is_deterministic() {
        use rand::Rng;
        let mut a = Resources::headless(8, 8);
        let mut b = Resources::headless(8, 8);
        assert_eq!(a.rng().random::<u64>(), b.rng().random::<u64>());
    }
}
