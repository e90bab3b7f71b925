//=========================================================================
// Cursor
//=========================================================================
//
// Mouse cursor selection. The core thread only picks a `CursorKind`; the
// platform thread shows the matching sprite, or an OS cursor icon when no
// sprite was loaded.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::assets::{AssetProvider, LoadMode, SpriteSheet};
use crate::core::platform_bridge::CoreEvent;
use crate::render::Surface;

//=== CursorKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorKind {
    #[default]
    Normal,
    /// Shown over clickable items.
    Hover,
}

impl CursorKind {
    pub const ALL: [CursorKind; 2] = [CursorKind::Normal, CursorKind::Hover];

    fn frame(self) -> usize {
        match self {
            CursorKind::Normal => 0,
            CursorKind::Hover => 1,
        }
    }

    /// Click point, in pixels from the sprite's top-left corner.
    pub fn hotspot(self) -> (u16, u16) {
        match self {
            CursorKind::Normal => (0, 0),
            CursorKind::Hover => (9, 0),
        }
    }
}

//=== Cursor Art ==========================================================

pub const CURSOR_SHEET_FILE: &str = "sprites/cursors.png";
pub const CURSOR_FRAME_SIZE: (u32, u32) = (32, 32);

pub fn cursor_sheet() -> SpriteSheet {
    SpriteSheet::strip(
        CURSOR_SHEET_FILE,
        "cursor",
        CursorKind::ALL.len() as u32,
        CURSOR_FRAME_SIZE.0,
        CURSOR_FRAME_SIZE.1,
    )
}

/// Sprite and hotspot for one cursor kind, handed to the platform once.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorArt {
    pub kind: CursorKind,
    pub image: Surface,
    pub hotspot: (u16, u16),
}

/// Cuts the cursor sheet into one [`CursorArt`] per kind.
///
/// Returns an empty list when the sheet is missing, leaving the platform
/// on system icons.
pub fn load_cursor_art(assets: &dyn AssetProvider) -> Vec<CursorArt> {
    let sheet = cursor_sheet();
    let mut sprites = match assets.load_sprite_sheet(&sheet, LoadMode::BLACK_KEY) {
        Ok(sprites) => sprites,
        Err(e) => {
            warn!(target: "assets", "{}, using system cursors", e);
            return Vec::new();
        }
    };

    CursorKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let image = sprites.remove(&format!("cursor_{}", kind.frame()))?;
            Some(CursorArt {
                kind,
                image,
                hotspot: kind.hotspot(),
            })
        })
        .collect()
}

//=== CursorProvider ======================================================

/// Applies cursor changes. Repeated requests for the current kind are
/// dropped.
pub trait CursorProvider {
    fn set_cursor(&mut self, kind: CursorKind);

    /// Kind most recently delivered.
    fn current(&self) -> CursorKind;
}

//=== ChannelCursor =======================================================

/// Forwards changes to the platform thread.
pub struct ChannelCursor {
    sender: Sender<CoreEvent>,
    current: CursorKind,
}

impl ChannelCursor {
    pub fn new(sender: Sender<CoreEvent>) -> Self {
        Self {
            sender,
            current: CursorKind::Normal,
        }
    }
}

impl CursorProvider for ChannelCursor {
    fn set_cursor(&mut self, kind: CursorKind) {
        if kind == self.current {
            return;
        }

        // Only a delivered change counts, so a dropped one is asked again
        match self.sender.try_send(CoreEvent::SetCursor(kind)) {
            Ok(()) => self.current = kind,
            Err(e) => debug!(target: "core", "Cursor change to {:?} not delivered: {}", kind, e),
        }
    }

    fn current(&self) -> CursorKind {
        self.current
    }
}

//=== RecordingCursor =====================================================

/// Keeps every applied change. Used headless.
#[derive(Debug, Default)]
pub struct RecordingCursor {
    current: CursorKind,
    changes: Vec<CursorKind>,
}

impl RecordingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[CursorKind] {
        &self.changes
    }
}

impl CursorProvider for RecordingCursor {
    fn set_cursor(&mut self, kind: CursorKind) {
        if kind == self.current {
            return;
        }
        trace!(target: "core", "Cursor -> {:?}", kind);
        self.current = kind;
        self.changes.push(kind);
    }

    fn current(&self) -> CursorKind {
        self.current
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
