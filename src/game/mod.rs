//=========================================================================
// Game
//=========================================================================
//
// Greedy Gardens menu content built on the core systems.
//
// Components:
// - menu_state:  background, boot-up cinematic, title sub-stack
// - title_state: option hover/selection after boot-up
// - submenus:    Play / Records / Settings placeholders
// - wind:        spawned background particles
// - background:  parallax and landscape layers
//
//=========================================================================

//=== Module Declarations =================================================

pub mod background;
pub mod constants;
pub mod menu_state;
pub mod submenus;
pub mod title_state;
pub mod wind;

//=== Public API ==========================================================

pub use menu_state::{MenuEvent, MenuState};
pub use submenus::{Submenu, SubmenuKind};
pub use title_state::{MenuItem, TitleOption, TitleState};
pub use wind::Wind;

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::state::State;
use crate::engine::GameConfig;
use crate::error::GameError;
use crate::resources::{AudioChannel, AudioError, AudioProvider, Resources};
use constants::{AMBIENCE, AMBIENCE_FADE_MS};

//=== Bootstrap ===========================================================

/// Game-wide setup: starts the ambience bed, once per run.
pub fn menu_startup(_config: &GameConfig, resources: &mut Resources) {
    if let Err(e) = start_ambience(resources.audio_mut()) {
        warn!(target: "audio", "Ambience unavailable: {}", e);
    }
}

fn start_ambience(audio: &mut dyn AudioProvider) -> Result<(), AudioError> {
    audio.play_sound(AudioChannel::Ambience, AMBIENCE, -1, AMBIENCE_FADE_MS)
}

/// Builds the root state: the menu.
pub fn menu_bootstrap(config: &GameConfig, resources: &mut Resources) -> Result<Box<dyn State>, GameError> {
    info!(target: "menu", "Creating menu (skip boot-up: {})", config.skip_bootup);
    Ok(Box::new(MenuState::new(resources, config.skip_bootup)?))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::globals::{GlobalContext, GlobalSystems};
    use crate::resources::{MemoryAssets, RecordingCursor, SilentAudio};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Silent output that counts `play_sound` calls.
    struct CountingAudio {
        inner: SilentAudio,
        sounds: Rc<Cell<usize>>,
    }

    impl AudioProvider for CountingAudio {
        fn load_music(&mut self, name: &str) -> Result<(), AudioError> {
            self.inner.load_music(name)
        }

        fn queue_music(&mut self, name: &str, loops: i32) -> Result<(), AudioError> {
            self.inner.queue_music(name, loops)
        }

        fn play_music(&mut self) -> Result<(), AudioError> {
            self.inner.play_music()
        }

        fn play_sound(&mut self, channel: AudioChannel, name: &str, loops: i32, fade_ms: u32) -> Result<(), AudioError> {
            self.sounds.set(self.sounds.get() + 1);
            self.inner.play_sound(channel, name, loops, fade_ms)
        }

        fn set_volume(&mut self, channel: AudioChannel, volume: f32) {
            self.inner.set_volume(channel, volume);
        }

        fn volume(&self, channel: AudioChannel) -> f32 {
            self.inner.volume(channel)
        }

        fn current_music(&self) -> Option<&str> {
            self.inner.current_music()
        }
    }

    fn counting_resources() -> (Resources, Rc<Cell<usize>>) {
        let sounds = Rc::new(Cell::new(0));
        let audio = CountingAudio {
            inner: SilentAudio::default(),
            sounds: Rc::clone(&sounds),
        };
        let resources = Resources::new(
            (64, 64),
            Box::new(MemoryAssets::new()),
            Box::new(audio),
            Box::new(RecordingCursor::new()),
            StdRng::seed_from_u64(0),
        );
        (resources, sounds)
    }

    #[test]
    fn ambience_loops_forever_on_its_channel() {
        let mut audio = SilentAudio::default();
        start_ambience(&mut audio).unwrap();
        assert_eq!(audio.sounds(), &[(AudioChannel::Ambience, AMBIENCE.to_string())]);
    }

    #[test]
    fn rebuilding_menu_does_not_restart_ambience() {
        let (mut resources, sounds) = counting_resources();
        let config = GameConfig::default();

        menu_startup(&config, &mut resources);
        for _ in 0..3 {
            menu_bootstrap(&config, &mut resources).unwrap();
        }
        assert_eq!(sounds.get(), 1);
    }

    #[test]
    fn bootstrap_builds_menu() {
        let mut resources = Resources::headless(64, 64);
        let config = GameConfig {
            skip_bootup: true,
            ..GameConfig::default()
        };

        let state = menu_bootstrap(&config, &mut resources).unwrap();
        assert_eq!(state.name(), "Menu");
    }

    #[test]
    fn root_stack_boots_menu_on_first_frame() {
        let mut ctx = GlobalContext::new(Resources::headless(64, 64));
        let config = GameConfig::default();
        let mut systems = GlobalSystems::new(Box::new(move |resources: &mut Resources| {
            menu_bootstrap(&config, resources)
        }));

        systems.update(&mut ctx, &[], 0.016).unwrap();
        assert_eq!(systems.root.top_name(), Some("Menu"));
        assert_eq!(ctx.resources.audio().current_music(), Some(constants::MENU_INTRO_MUSIC));
    }
}
