//=========================================================================
// Menu State
//=========================================================================
//
// Root state of the game: the animated menu background, the boot-up
// cinematic and the sub-stack that hosts the title and its submenus.
//
// Update order (per frame):
//   substate → tweens (+ completion events) → parallax → winds
//
// Render order (back to front):
//   sky → parallax → landscapes → winds → noise → pixelate
//   → overlay → intro logo → game logo + options | substate
//
// Boot-up:
//   t=0      intro logo fades and scales in
//   t=1.75   overlay fades out, landscape and winds slide into place,
//            intro logo slides away (completion finishes boot-up)
//   t=4      game logo pops in, options follow 0.125s apart
//
//=========================================================================

//=== Standard Library ====================================================

use std::rc::Rc;

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::background::{LandscapeLayer, ParallaxLayer};
use super::constants::*;
use super::title_state::{MenuItem, TitleOption, TitleState};
use super::wind::Wind;
use crate::core::spawner::EntitySpawner;
use crate::core::state::{State, StateContext, StateStack};
use crate::core::tween::{BagRef, Easing, Prop, PropertyBag, TweenEngine, TweenError, TweenSpec};
use crate::error::GameError;
use crate::render::effects::decorate_label;
use crate::render::{color_darken, color_lighten, Anchor, Surface, WHITE};
use crate::resources::assets::{image_or_placeholder, sheet_or_placeholder};
use crate::resources::{AudioError, AudioProvider, LoadMode, Resources};

//=== MenuEvent ===========================================================

/// Completion events raised by the menu's tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    FinishBootup,
}

//=== Intro ===============================================================

/// Assets that only live until boot-up finishes.
struct Intro {
    overlay: Surface,
    overlay_props: BagRef,
    logo: Surface,
    logo_props: BagRef,
}

//=== MenuOption ==========================================================

struct MenuOption {
    item: MenuItem,
    surface: Surface,
    center: (i32, i32),
    props: BagRef,
}

//=== MenuState ===========================================================

pub struct MenuState {
    tweens: TweenEngine<MenuEvent>,
    substates: StateStack,

    //--- Background -------------------------------------------------------
    sky: Surface,
    parallax: Vec<ParallaxLayer>,
    landscapes: Vec<LandscapeLayer>,
    noise: Surface,

    //--- Winds ------------------------------------------------------------
    wind_frames: Rc<[Surface]>,
    winds_props: BagRef,
    winds: EntitySpawner<Wind>,

    //--- Foreground -------------------------------------------------------
    intro: Option<Intro>,
    game_logo: Surface,
    game_logo_props: BagRef,
    options: Vec<MenuOption>,

    finished_bootup: bool,
}

impl MenuState {
    //--- Construction -----------------------------------------------------

    /// Loads every menu asset and starts boot-up.
    ///
    /// With `skip_bootup` the menu lands directly in its final layout with
    /// the title substate pushed and no tweens registered.
    pub fn new(resources: &mut Resources, skip_bootup: bool) -> Result<Self, GameError> {
        let mut menu = Self::load(resources);

        if skip_bootup {
            info!(target: "menu", "Skipping boot-up");
            menu.finish_bootup(resources);
        } else {
            menu.schedule_bootup()?;
        }
        Ok(menu)
    }

    fn load(resources: &Resources) -> Self {
        let assets = resources.assets();
        let (width, height) = resources.canvas_size();
        let center_x = width as i32 / 2;

        //--- Intro --------------------------------------------------------
        let studio = image_or_placeholder(assets, INTRO_LOGO, LoadMode::BLACK_KEY)
            .scale_by(INTRO_LOGO_FACTOR, INTRO_LOGO_FACTOR);
        let mut logo = Surface::new(studio.width(), studio.height() + INTRO_CAPTION_SPACE);
        logo.blit(&studio, (0, 0), Anchor::TopLeft);

        let caption = decorate_label(
            &image_or_placeholder(assets, PRESENTS_LABEL, LoadMode::Alpha),
            INTRO_DECO_DISTANCE,
            color_lighten(MONO_100, 0.75),
            WHITE,
        );
        let caption_pos = (
            logo.width() as i32 / 2,
            logo.height() as i32 / 2 + INTRO_CAPTION_DROP,
        );
        logo.blit(&caption, caption_pos, Anchor::MidTop);

        let intro = Intro {
            overlay: Surface::filled(width, height, WHITE),
            overlay_props: PropertyBag::new().with(Prop::Alpha, 255.0).shared(),
            logo,
            logo_props: PropertyBag::new()
                .with(Prop::YOffset, 0.0)
                .with(Prop::Alpha, INTRO_START_ALPHA)
                .with(Prop::Scale, INTRO_START_SCALE)
                .shared(),
        };

        //--- Background ---------------------------------------------------
        let parallax = PARALLAX
            .iter()
            .map(|&(name, step)| {
                let image = image_or_placeholder(assets, name, LoadMode::BLACK_KEY);
                ParallaxLayer::new(image, step * PIXEL_SIZE as f32)
            })
            .collect();

        let landscapes = LANDSCAPES
            .iter()
            .map(|&(name, start)| {
                let image = image_or_placeholder(assets, name, LoadMode::BLACK_KEY);
                LandscapeLayer::new(image, PropertyBag::new().with(Prop::YOffset, start).shared())
            })
            .collect();

        //--- Winds --------------------------------------------------------
        let sheet = wind_sheet();
        let mut sprites = sheet_or_placeholder(assets, &sheet, LoadMode::Alpha);
        let wind_frames: Rc<[Surface]> = sheet
            .names()
            .filter_map(|name| sprites.remove(name))
            .map(|sprite| sprite.scale_by(WIND_SCALE.0, WIND_SCALE.1))
            .collect();

        //--- Title --------------------------------------------------------
        let game_logo = image_or_placeholder(assets, GAME_LOGO, LoadMode::BLACK_KEY)
            .scale_by(GAME_LOGO_FACTOR, GAME_LOGO_FACTOR);

        let options = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, &item)| {
                let label = image_or_placeholder(assets, item.label_asset(), LoadMode::Alpha);
                MenuOption {
                    item,
                    surface: decorate_label(
                        &label,
                        OPTION_DECO_DISTANCE,
                        color_darken(WHITE, 0.5),
                        MONO_50,
                    ),
                    center: (center_x, OPTIONS_TOP + OPTIONS_SPACING * i as i32),
                    props: title_props(),
                }
            })
            .collect();

        debug!(target: "menu", "Menu assets ready ({} wind frames)", wind_frames.len());

        Self {
            tweens: TweenEngine::new(),
            substates: StateStack::new("menu"),
            sky: image_or_placeholder(assets, SKY, LoadMode::BLACK_KEY),
            parallax,
            landscapes,
            noise: image_or_placeholder(assets, NOISE, LoadMode::Alpha),
            wind_frames,
            winds_props: PropertyBag::new().with(Prop::YOffset, WIND_START_OFFSET).shared(),
            winds: EntitySpawner::new(WIND_SPAWN_RATE),
            intro: Some(intro),
            game_logo,
            game_logo_props: title_props(),
            options,
            finished_bootup: false,
        }
    }

    //--- Boot-up ----------------------------------------------------------

    fn schedule_bootup(&mut self) -> Result<(), TweenError> {
        let Some(intro) = &self.intro else {
            return Ok(());
        };
        let tweens = &mut self.tweens;

        // Intro logo
        tweens.animate(TweenSpec::new(&intro.logo_props, Prop::Alpha, 255.0, 2.0).easing(Easing::OutCubic))?;
        tweens.animate(TweenSpec::new(&intro.logo_props, Prop::Scale, 1.0, 3.0).easing(Easing::OutCubic))?;

        // Reveal
        let delay = REVEAL_DELAY;
        tweens.animate(
            TweenSpec::new(&intro.overlay_props, Prop::Alpha, 0.0, 2.0)
                .easing(Easing::OutQuad)
                .delay(delay),
        )?;
        for layer in &self.landscapes {
            tweens.animate(slide(layer.props(), delay))?;
        }
        tweens.animate(slide(&self.winds_props, delay))?;
        tweens
            .animate(
                TweenSpec::new(&intro.logo_props, Prop::YOffset, INTRO_EXIT_OFFSET, SLIDE_DURATION)
                    .easing(Easing::OutQuint)
                    .delay(delay),
            )?
            .on_complete(MenuEvent::FinishBootup);

        // Title
        let mut delay = TITLE_DELAY;
        tweens.animate(pop_scale(&self.game_logo_props, 0.75, delay))?;
        tweens.animate(pop_alpha(&self.game_logo_props, delay))?;
        for option in &self.options {
            delay += OPTION_STAGGER;
            tweens.animate(pop_scale(&option.props, 0.5, delay))?;
            tweens.animate(pop_alpha(&option.props, delay))?;
        }

        info!(target: "menu", "Boot-up scheduled ({} tweens)", tweens.active_count());
        Ok(())
    }

    /// Moves every element to its resting value, drops the intro, bakes
    /// the title surfaces and pushes the title substate.
    ///
    /// Runs once; returns `false` for any later request.
    pub fn finish_bootup(&mut self, resources: &mut Resources) -> bool {
        if self.finished_bootup {
            warn!(target: "menu", "Boot-up already finished, ignoring");
            return false;
        }
        self.finished_bootup = true;

        //--- Final values -------------------------------------------------
        let mut settled: Vec<(&BagRef, Prop, f32)> = vec![(&self.winds_props, Prop::YOffset, 0.0)];
        for layer in &self.landscapes {
            settled.push((layer.props(), Prop::YOffset, 0.0));
        }
        for props in std::iter::once(&self.game_logo_props).chain(self.options.iter().map(|o| &o.props)) {
            settled.push((props, Prop::Scale, 1.0));
            settled.push((props, Prop::Alpha, 255.0));
        }

        for (bag, prop, value) in settled {
            self.tweens.cancel_bag(bag);
            if let Err(e) = bag.borrow_mut().set(prop, value) {
                warn!(target: "menu", "Could not settle {}: {}", prop, e);
            }
        }

        //--- Intro teardown -----------------------------------------------
        if let Some(intro) = self.intro.take() {
            self.tweens.cancel_bag(&intro.overlay_props);
            self.tweens.cancel_bag(&intro.logo_props);
        }

        //--- Bake ---------------------------------------------------------
        let scale = self.game_logo_props.borrow().get_or(Prop::Scale, 1.0);
        self.game_logo = self.game_logo.scale_by(scale, scale);
        for option in &mut self.options {
            let scale = option.props.borrow().get_or(Prop::Scale, 1.0);
            option.surface = option.surface.scale_by(scale, scale);
        }

        info!(target: "menu", "Boot-up finished");
        let title = TitleState::new(
            self.game_logo.clone(),
            self.options
                .iter()
                .map(|option| TitleOption {
                    item: option.item,
                    surface: option.surface.clone(),
                    center: option.center,
                })
                .collect(),
        );
        self.substates.push(Box::new(title), resources);
        true
    }

    //--- Queries ----------------------------------------------------------

    pub fn finished_bootup(&self) -> bool {
        self.finished_bootup
    }

    pub fn tweens(&self) -> &TweenEngine<MenuEvent> {
        &self.tweens
    }

    pub fn substates(&self) -> &StateStack {
        &self.substates
    }

    pub fn wind_count(&self) -> usize {
        self.winds.len()
    }

    //--- Rendering Helpers ------------------------------------------------

    /// Background composite before the retro filter.
    fn compose_background(&self, width: u32, height: u32) -> Surface {
        let mut bg = Surface::new(width, height);
        bg.blit(&self.sky, (0, 0), Anchor::TopLeft);
        for layer in &self.parallax {
            layer.render(&mut bg);
        }
        for layer in &self.landscapes {
            layer.render(&mut bg);
        }
        self.winds.render(&mut bg);
        bg.blit(&self.noise, (0, 0), Anchor::TopLeft);
        bg
    }
}

//--- Schedule Builders ---------------------------------------------------

fn title_props() -> BagRef {
    PropertyBag::new()
        .with(Prop::Scale, TITLE_START_SCALE)
        .with(Prop::Alpha, 0.0)
        .shared()
}

fn slide(bag: &BagRef, delay: f32) -> TweenSpec {
    TweenSpec::new(bag, Prop::YOffset, 0.0, SLIDE_DURATION)
        .easing(Easing::OutQuint)
        .delay(delay)
}

fn pop_scale(bag: &BagRef, duration: f32, delay: f32) -> TweenSpec {
    TweenSpec::new(bag, Prop::Scale, 1.0, duration)
        .easing(Easing::OutElastic)
        .delay(delay)
}

fn pop_alpha(bag: &BagRef, delay: f32) -> TweenSpec {
    TweenSpec::new(bag, Prop::Alpha, 255.0, 0.1)
        .easing(Easing::OutCirc)
        .delay(delay)
}

/// Intro track once, then the loop forever.
fn start_music(audio: &mut dyn AudioProvider) -> Result<(), AudioError> {
    audio.load_music(MENU_INTRO_MUSIC)?;
    audio.queue_music(MENU_LOOP_MUSIC, -1)?;
    audio.play_music()
}

//--- Drawing Helpers -----------------------------------------------------

fn alpha_of(props: &BagRef) -> u8 {
    props.borrow().get_or(Prop::Alpha, 255.0).round().clamp(0.0, 255.0) as u8
}

/// Draws `surface` at its bag's scale and alpha, centred on `pos`.
fn blit_animated(target: &mut Surface, surface: &Surface, props: &BagRef, pos: (i32, i32)) {
    let alpha = alpha_of(props);
    if alpha == 0 {
        return;
    }
    let scale = props.borrow().get_or(Prop::Scale, 1.0);
    if scale == 1.0 {
        target.blit_alpha(surface, pos, Anchor::Center, alpha);
    } else {
        target.blit_alpha(&surface.scale_by(scale, scale), pos, Anchor::Center, alpha);
    }
}

//=== State Implementation ================================================

impl State for MenuState {
    fn on_enter(&mut self, resources: &mut Resources) {
        if let Err(e) = start_music(resources.audio_mut()) {
            warn!(target: "audio", "Menu music unavailable: {}", e);
        }
    }

    fn on_exit(&mut self, resources: &mut Resources) {
        self.substates.clear(resources);
        self.tweens.clear();
    }

    fn update(&mut self, ctx: &mut StateContext, dt: f32) {
        //--- Substates ----------------------------------------------------
        self.substates.update(ctx.resources, ctx.input, dt);

        //--- Tweens -------------------------------------------------------
        for event in self.tweens.advance(dt) {
            match event {
                MenuEvent::FinishBootup => {
                    self.finish_bootup(ctx.resources);
                }
            }
        }

        //--- Parallax -----------------------------------------------------
        for layer in &mut self.parallax {
            layer.update(dt);
        }

        //--- Winds --------------------------------------------------------
        let canvas = ctx.resources.canvas_size();
        let frames = &self.wind_frames;
        let props = &self.winds_props;
        self.winds.update(dt, ctx.resources.rng(), |rng| {
            Wind::spawn(rng, Rc::clone(frames), Rc::clone(props), canvas)
        });
    }

    fn render(&self, target: &mut Surface, resources: &Resources) {
        let (width, height) = target.size();
        let center_x = width as i32 / 2;

        //--- Background ---------------------------------------------------
        let bg = self.compose_background(width, height).pixelate(PIXEL_SIZE);
        target.blit(&bg, (0, 0), Anchor::TopLeft);

        //--- Intro --------------------------------------------------------
        if let Some(intro) = &self.intro {
            target.blit_alpha(&intro.overlay, (0, 0), Anchor::TopLeft, alpha_of(&intro.overlay_props));

            let y_offset = intro.logo_props.borrow().get_or(Prop::YOffset, 0.0);
            let pos = (center_x, height as i32 / 2 - 20 + y_offset.round() as i32);
            blit_animated(target, &intro.logo, &intro.logo_props, pos);
        }

        //--- Foreground ---------------------------------------------------
        if self.substates.is_empty() {
            blit_animated(target, &self.game_logo, &self.game_logo_props, (center_x, GAME_LOGO_Y));
            for option in &self.options {
                blit_animated(target, &option.surface, &option.props, option.center);
            }
        } else {
            self.substates.render(target, resources);
        }
    }

    fn name(&self) -> &'static str {
        "Menu"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
