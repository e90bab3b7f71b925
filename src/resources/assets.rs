//=========================================================================
// Assets
//=========================================================================
//
// Image and sprite-sheet loading behind the `AssetProvider` trait.
//
// Implementations:
// - FsAssets:     decodes files under a root directory with `image`
// - MemoryAssets: in-memory table, used by tests and headless runs
//
// Names are relative paths such as "menu_bg/1_sky.png".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::render::{Color, Surface, TRANSPARENT};

//=== LoadMode ============================================================

/// How transparency is derived for a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Alpha discarded, every pixel opaque.
    Opaque,
    /// Alpha channel kept as decoded.
    Alpha,
    /// Pixels matching the key color become transparent, all others opaque.
    ColorKey(Color),
}

impl LoadMode {
    /// Color key used by most menu art.
    pub const BLACK_KEY: LoadMode = LoadMode::ColorKey(image::Rgba([0, 0, 0, 255]));

    fn apply(self, surface: Surface) -> Surface {
        match self {
            LoadMode::Alpha => surface,
            LoadMode::Opaque => surface.map_pixels(|mut px| {
                px[3] = 255;
                px
            }),
            LoadMode::ColorKey(key) => surface.map_pixels(|mut px| {
                if px[0] == key[0] && px[1] == key[1] && px[2] == key[2] {
                    TRANSPARENT
                } else {
                    px[3] = 255;
                    px
                }
            }),
        }
    }
}

//=== SpriteSheet =========================================================

/// One named rectangle inside a sheet image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRect {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A sheet image plus the sprites cut from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub file: String,
    pub sprites: Vec<SpriteRect>,
}

impl SpriteSheet {
    /// Horizontal strip of `count` equally sized frames named
    /// `{prefix}_{i}`.
    pub fn strip(file: &str, prefix: &str, count: u32, width: u32, height: u32) -> Self {
        let sprites = (0..count)
            .map(|i| SpriteRect {
                name: format!("{prefix}_{i}"),
                x: i * width,
                y: 0,
                width,
                height,
            })
            .collect();
        Self {
            file: file.to_string(),
            sprites,
        }
    }

    /// Sprite names in sheet order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|s| s.name.as_str())
    }
}

//=== AssetError ==========================================================

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset `{0}` not found")]
    NotFound(String),

    #[error("failed to decode `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("sprite `{sprite}` lies outside sheet `{sheet}`")]
    SpriteOutOfBounds { sheet: String, sprite: String },
}

//=== AssetProvider =======================================================

/// Image loading operations used by game states.
pub trait AssetProvider {
    /// Loads one image with the given transparency mode.
    fn load_image(&self, name: &str, mode: LoadMode) -> Result<Surface, AssetError>;

    /// Loads a sheet and cuts every sprite it declares.
    fn load_sprite_sheet(
        &self,
        sheet: &SpriteSheet,
        mode: LoadMode,
    ) -> Result<HashMap<String, Surface>, AssetError> {
        let image = self.load_image(&sheet.file, mode)?;
        cut_sprites(&image, sheet)
    }
}

fn cut_sprites(image: &Surface, sheet: &SpriteSheet) -> Result<HashMap<String, Surface>, AssetError> {
    let mut sprites = HashMap::with_capacity(sheet.sprites.len());
    for rect in &sheet.sprites {
        let fits = rect.x.checked_add(rect.width).is_some_and(|r| r <= image.width())
            && rect.y.checked_add(rect.height).is_some_and(|b| b <= image.height());
        if !fits {
            return Err(AssetError::SpriteOutOfBounds {
                sheet: sheet.file.clone(),
                sprite: rect.name.clone(),
            });
        }
        sprites.insert(rect.name.clone(), image.crop(rect.x, rect.y, rect.width, rect.height));
    }
    debug!(target: "assets", "Cut {} sprites from {}", sprites.len(), sheet.file);
    Ok(sprites)
}

//--- Degrading Loaders ---------------------------------------------------

/// Loads `name`, or logs a warning and returns a 1x1 transparent
/// placeholder.
pub fn image_or_placeholder(assets: &dyn AssetProvider, name: &str, mode: LoadMode) -> Surface {
    assets.load_image(name, mode).unwrap_or_else(|e| {
        warn!(target: "assets", "{}, using placeholder", e);
        Surface::new(1, 1)
    })
}

/// Loads `sheet`, substituting a placeholder for every sprite on failure.
pub fn sheet_or_placeholder(
    assets: &dyn AssetProvider,
    sheet: &SpriteSheet,
    mode: LoadMode,
) -> HashMap<String, Surface> {
    assets.load_sprite_sheet(sheet, mode).unwrap_or_else(|e| {
        warn!(target: "assets", "{}, using placeholders", e);
        sheet
            .names()
            .map(|name| (name.to_string(), Surface::new(1, 1)))
            .collect()
    })
}

//=== FsAssets ============================================================

/// Decodes images from files under `root`.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProvider for FsAssets {
    fn load_image(&self, name: &str, mode: LoadMode) -> Result<Surface, AssetError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let image = image::open(&path).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;
        debug!(target: "assets", "Loaded {} ({}x{})", name, image.width(), image.height());

        Ok(mode.apply(Surface::from_image(image.to_rgba8())))
    }
}

//=== MemoryAssets ========================================================

/// Images registered up front under their names.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<String, Surface>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, surface: Surface) {
        self.images.insert(name.to_string(), surface);
    }

    pub fn with(mut self, name: &str, surface: Surface) -> Self {
        self.insert(name, surface);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetProvider for MemoryAssets {
    fn load_image(&self, name: &str, mode: LoadMode) -> Result<Surface, AssetError> {
        self.images
            .get(name)
            .cloned()
            .map(|surface| mode.apply(surface))
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BLACK, WHITE};
    use image::Rgba;

    fn checker() -> Surface {
        let mut s = Surface::filled(4, 2, BLACK);
        s.image_mut().put_pixel(1, 0, WHITE);
        s.image_mut().put_pixel(2, 1, Rgba([10, 20, 30, 40]));
        s
    }

    //--- Load Modes -------------------------------------------------------

    #[test]
    fn color_key_clears_matching_pixels() {
        let assets = MemoryAssets::new().with("a.png", checker());
        let s = assets.load_image("a.png", LoadMode::BLACK_KEY).unwrap();

        assert_eq!(s.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(s.pixel(1, 0), Some(WHITE));
        assert_eq!(s.pixel(2, 1), Some(Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn opaque_forces_alpha() {
        let assets = MemoryAssets::new().with("a.png", checker());
        let s = assets.load_image("a.png", LoadMode::Opaque).unwrap();
        assert_eq!(s.pixel(2, 1), Some(Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn alpha_mode_keeps_pixels() {
        let assets = MemoryAssets::new().with("a.png", checker());
        assert_eq!(assets.load_image("a.png", LoadMode::Alpha).unwrap(), checker());
    }

    //--- Sprite Sheets ----------------------------------------------------

    #[test]
    fn strip_cuts_frames_left_to_right() {
        let assets = MemoryAssets::new().with("s.png", checker());
        let sheet = SpriteSheet::strip("s.png", "f", 2, 2, 2);

        let sprites = assets.load_sprite_sheet(&sheet, LoadMode::Alpha).unwrap();

        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites["f_0"].pixel(1, 0), Some(WHITE));
        assert_eq!(sprites["f_1"].pixel(0, 1), Some(Rgba([10, 20, 30, 40])));
    }

    #[test]
    fn oversized_sprite_is_rejected() {
        let assets = MemoryAssets::new().with("s.png", checker());
        let sheet = SpriteSheet::strip("s.png", "f", 3, 2, 2);

        let err = assets.load_sprite_sheet(&sheet, LoadMode::Alpha).unwrap_err();
        assert!(matches!(err, AssetError::SpriteOutOfBounds { ref sprite, .. } if sprite == "f_2"));
    }

    //--- Degradation ------------------------------------------------------

    #[test]
    fn missing_image_degrades_to_placeholder() {
        let assets = MemoryAssets::new();
        let s = image_or_placeholder(&assets, "nope.png", LoadMode::Alpha);
        assert_eq!(s.size(), (1, 1));
        assert_eq!(s.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn missing_sheet_yields_placeholder_per_sprite() {
        let sheet = SpriteSheet::strip("gone.png", "w", 3, 8, 8);
        let sprites = sheet_or_placeholder(&MemoryAssets::new(), &sheet, LoadMode::Alpha);
        assert_eq!(sprites.len(), 3);
        assert!(sprites.contains_key("w_2"));
    }

    #[test]
    fn fs_assets_reports_missing_file() {
        let assets = FsAssets::new("/definitely/not/here");
        assert!(matches!(
            assets.load_image("x.png", LoadMode::Alpha),
            Err(AssetError::NotFound(_))
        ));
    }
}
