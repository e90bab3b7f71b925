//=========================================================================
// Menu Constants
//=========================================================================
//
// Asset names, layout positions and boot-up timings for the main menu.
// Positions are in canvas pixels, timings in seconds.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::Rgba;

//=== Internal Dependencies ===============================================

use crate::render::Color;
use crate::resources::SpriteSheet;

//=== Colors ==============================================================

pub const MONO_100: Color = Rgba([100, 100, 100, 255]);
pub const MONO_50: Color = Rgba([50, 50, 50, 255]);

//=== Assets ==============================================================

//--- Intro ---------------------------------------------------------------

pub const INTRO_LOGO: &str = "graphics/namsom_logo.png";
pub const PRESENTS_LABEL: &str = "graphics/presents.png";
pub const INTRO_LOGO_FACTOR: f32 = 7.0;

/// Extra height below the studio logo that holds the caption.
pub const INTRO_CAPTION_SPACE: u32 = 50;
pub const INTRO_CAPTION_DROP: i32 = 30;
pub const INTRO_DECO_DISTANCE: u32 = 2;

//--- Background ----------------------------------------------------------

pub const SKY: &str = "menu_bg/1_sky.png";

/// Cloud layers and their scroll steps, back to front.
pub const PARALLAX: [(&str, f32); 3] = [
    ("menu_bg/2_cloud_1.png", 0.5),
    ("menu_bg/3_cloud_2.png", 2.5),
    ("menu_bg/4_cloud_3.png", 7.0),
];

/// Landscape bands and where they start before sliding into place.
pub const LANDSCAPES: [(&str, f32); 3] = [
    ("menu_bg/5_landscape_1.png", 200.0),
    ("menu_bg/6_landscape_2.png", 400.0),
    ("menu_bg/7_landscape_3.png", 1000.0),
];

pub const NOISE: &str = "menu_bg/8_noise.png";

/// Retro filter block size for the background composite.
pub const PIXEL_SIZE: u32 = 2;

//--- Wind ----------------------------------------------------------------

pub const WIND_SHEET_FILE: &str = "sprites/wind.png";
pub const WIND_FRAMES: u32 = 8;
pub const WIND_FRAME_SIZE: (u32, u32) = (32, 16);
pub const WIND_SCALE: (f32, f32) = (4.0, 2.0);
pub const WIND_SPAWN_RATE: f32 = 0.85;
pub const WIND_START_OFFSET: f32 = 1000.0;

pub fn wind_sheet() -> SpriteSheet {
    SpriteSheet::strip(
        WIND_SHEET_FILE,
        "wind",
        WIND_FRAMES,
        WIND_FRAME_SIZE.0,
        WIND_FRAME_SIZE.1,
    )
}

//--- Title ---------------------------------------------------------------

pub const GAME_LOGO: &str = "graphics/game_logo.png";
pub const GAME_LOGO_FACTOR: f32 = 4.0;
pub const GAME_LOGO_Y: i32 = 150;

pub const OPTIONS_TOP: i32 = 340;
pub const OPTIONS_SPACING: i32 = 80;
pub const OPTION_DECO_DISTANCE: u32 = 3;

/// Alpha of the option under the cursor.
pub const HOVER_ALPHA: u8 = 200;

//--- Audio ---------------------------------------------------------------

pub const MENU_INTRO_MUSIC: &str = "music/menu_intro.ogg";
pub const MENU_LOOP_MUSIC: &str = "music/menu_loop.ogg";
pub const AMBIENCE: &str = "sfx/ambience.ogg";
pub const AMBIENCE_FADE_MS: u32 = 3000;

//=== Boot-up Timeline ====================================================

pub const INTRO_START_ALPHA: f32 = 0.0;
pub const INTRO_START_SCALE: f32 = 0.7;
pub const INTRO_EXIT_OFFSET: f32 = -500.0;

pub const TITLE_START_SCALE: f32 = 0.5;

/// Overlay fade and the landscape slide start here.
pub const REVEAL_DELAY: f32 = 1.75;
pub const SLIDE_DURATION: f32 = 3.25;

/// Game logo pops in here; options follow one stagger apart.
pub const TITLE_DELAY: f32 = 4.0;
pub const OPTION_STAGGER: f32 = 0.125;
