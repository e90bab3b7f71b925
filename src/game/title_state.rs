//=========================================================================
// Title Substate
//=========================================================================
//
// First substate of the menu once boot-up is over. Draws the baked game
// logo and options, tracks hover and keyboard selection, and opens the
// chosen submenu on the menu's sub-stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::constants::{GAME_LOGO_Y, HOVER_ALPHA};
use super::submenus::{Submenu, SubmenuKind};
use crate::core::input::{KeyCode, MouseButton};
use crate::core::state::{State, StateContext};
use crate::render::{Anchor, Surface};
use crate::resources::{CursorKind, Resources};

//=== MenuItem ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    Play,
    Records,
    Settings,
    Quit,
}

impl MenuItem {
    /// Top to bottom.
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Play,
        MenuItem::Records,
        MenuItem::Settings,
        MenuItem::Quit,
    ];

    /// Image holding the item's caption.
    pub fn label_asset(self) -> &'static str {
        match self {
            MenuItem::Play => "graphics/option_play.png",
            MenuItem::Records => "graphics/option_records.png",
            MenuItem::Settings => "graphics/option_settings.png",
            MenuItem::Quit => "graphics/option_quit.png",
        }
    }

    fn submenu(self) -> Option<SubmenuKind> {
        match self {
            MenuItem::Play => Some(SubmenuKind::Play),
            MenuItem::Records => Some(SubmenuKind::Records),
            MenuItem::Settings => Some(SubmenuKind::Settings),
            MenuItem::Quit => None,
        }
    }
}

//=== TitleOption =========================================================

/// A decorated caption centred at a fixed canvas position.
#[derive(Debug, Clone)]
pub struct TitleOption {
    pub item: MenuItem,
    pub surface: Surface,
    pub center: (i32, i32),
}

impl TitleOption {
    /// `true` if the canvas point lies on the option's rectangle.
    pub fn contains(&self, point: (f32, f32)) -> bool {
        let (x, y) = Anchor::Center.origin(self.center, self.surface.size());
        let (w, h) = self.surface.size();
        let (px, py) = point;
        px >= x as f32 && py >= y as f32 && px < (x + w as i32) as f32 && py < (y + h as i32) as f32
    }
}

//=== TitleState ==========================================================

pub struct TitleState {
    game_logo: Surface,
    options: Vec<TitleOption>,
    hovered: Option<usize>,
    selected: Option<usize>,
}

impl TitleState {
    pub fn new(game_logo: Surface, options: Vec<TitleOption>) -> Self {
        Self {
            game_logo,
            options,
            hovered: None,
            selected: None,
        }
    }

    /// Option under the cursor.
    pub fn hovered(&self) -> Option<MenuItem> {
        self.hovered.map(|i| self.options[i].item)
    }

    /// Option chosen with the keyboard or mouse, if any.
    pub fn selected(&self) -> Option<MenuItem> {
        self.selected.map(|i| self.options[i].item)
    }

    //--- Internal Helpers -------------------------------------------------

    fn option_at(&self, point: (f32, f32)) -> Option<usize> {
        self.options.iter().position(|option| option.contains(point))
    }

    fn step_selection(&mut self, down: bool) {
        let count = self.options.len();
        if count == 0 {
            return;
        }
        self.selected = Some(match (self.selected, down) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    fn activate(&self, index: usize, ctx: &mut StateContext) {
        let item = self.options[index].item;
        info!(target: "menu", "Selected {:?}", item);

        match item.submenu() {
            Some(kind) => ctx.transitions.push_state(Box::new(Submenu::new(kind))),
            None => ctx.resources.request_quit(),
        }
    }
}

impl State for TitleState {
    fn on_enter(&mut self, resources: &mut Resources) {
        self.hovered = None;
        resources.set_cursor(CursorKind::Normal);
    }

    fn update(&mut self, ctx: &mut StateContext, _dt: f32) {
        //--- Mouse --------------------------------------------------------
        self.hovered = ctx.input.mouse_position().and_then(|point| self.option_at(point));
        if ctx.input.mouse_moved() && self.hovered.is_some() {
            self.selected = self.hovered;
        }

        let cursor = match self.hovered {
            Some(_) => CursorKind::Hover,
            None => CursorKind::Normal,
        };
        ctx.resources.set_cursor(cursor);

        //--- Keyboard -----------------------------------------------------
        if ctx.input.is_key_pressed(KeyCode::ArrowDown) {
            self.step_selection(true);
        }
        if ctx.input.is_key_pressed(KeyCode::ArrowUp) {
            self.step_selection(false);
        }

        //--- Activation ---------------------------------------------------
        if ctx.input.is_button_pressed(MouseButton::Left) {
            if let Some(index) = self.hovered {
                self.activate(index, ctx);
            }
        } else if ctx.input.is_key_pressed(KeyCode::Enter) {
            if let Some(index) = self.selected {
                self.activate(index, ctx);
            }
        }
    }

    fn render(&self, target: &mut Surface, _resources: &Resources) {
        let center_x = target.width() as i32 / 2;
        target.blit(&self.game_logo, (center_x, GAME_LOGO_Y), Anchor::Center);

        let highlighted = self.hovered.or(self.selected);
        for (i, option) in self.options.iter().enumerate() {
            let alpha = if highlighted == Some(i) { HOVER_ALPHA } else { u8::MAX };
            target.blit_alpha(&option.surface, option.center, Anchor::Center, alpha);
        }
    }

    fn name(&self) -> &'static str {
        "Menu_Title"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, StateTracker};
    use crate::core::state::StateStack;
    use crate::render::WHITE;

    //--- Test Helpers -----------------------------------------------------

    /// Four 20x10 options stacked 20 px apart around x = 50.
    fn title() -> TitleState {
        let options = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, &item)| TitleOption {
                item,
                surface: Surface::filled(20, 10, WHITE),
                center: (50, 20 + 20 * i as i32),
            })
            .collect();
        TitleState::new(Surface::filled(4, 4, WHITE), options)
    }

    fn frame(events: &[InputEvent]) -> StateTracker {
        let mut input = StateTracker::new();
        input.process_events(events);
        input.finalize_frame();
        input
    }

    fn setup() -> (StateStack, Resources) {
        let mut resources = Resources::headless(100, 100);
        let mut stack = StateStack::new("menu");
        stack.push(Box::new(title()), &mut resources);
        (stack, resources)
    }

    //=====================================================================
    // Hit Testing
    //=====================================================================

    #[test]
    fn option_rect_is_centred() {
        let option = TitleOption {
            item: MenuItem::Play,
            surface: Surface::filled(20, 10, WHITE),
            center: (50, 20),
        };
        assert!(option.contains((40.0, 15.0)));
        assert!(option.contains((59.5, 24.5)));
        assert!(!option.contains((60.0, 20.0)));
        assert!(!option.contains((50.0, 14.0)));
    }

    //=====================================================================
    // Hover Tests
    //=====================================================================

    #[test]
    fn hovering_an_option_switches_cursor() {
        let (mut stack, mut resources) = setup();

        stack.update(&mut resources, &frame(&[InputEvent::MouseMoved { x: 50.0, y: 40.0 }]), 0.016);
        assert_eq!(resources.cursor(), CursorKind::Hover);

        stack.update(&mut resources, &frame(&[InputEvent::MouseMoved { x: 5.0, y: 5.0 }]), 0.016);
        assert_eq!(resources.cursor(), CursorKind::Normal);
    }

    #[test]
    fn hovered_option_is_tinted() {
        let mut state = title();
        let mut resources = Resources::headless(100, 100);
        let mut transitions = crate::core::state::TransitionQueue::new();
        let input = frame(&[InputEvent::MouseMoved { x: 50.0, y: 20.0 }]);
        let mut ctx = StateContext {
            resources: &mut resources,
            input: &input,
            transitions: &mut transitions,
        };
        state.update(&mut ctx, 0.016);
        assert_eq!(state.hovered(), Some(MenuItem::Play));

        let mut canvas = Surface::new(100, 100);
        state.render(&mut canvas, &resources);
        let tinted = canvas.pixel(50, 20).unwrap();
        let plain = canvas.pixel(50, 40).unwrap();
        assert_eq!(tinted.0[3], HOVER_ALPHA);
        assert_eq!(plain.0[3], 255);
    }

    //=====================================================================
    // Activation Tests
    //=====================================================================

    #[test]
    fn click_opens_submenu_on_same_stack() {
        let (mut stack, mut resources) = setup();

        let input = frame(&[
            InputEvent::MouseMoved { x: 50.0, y: 40.0 },
            InputEvent::MouseButtonDown { button: MouseButton::Left },
        ]);
        stack.update(&mut resources, &input, 0.016);

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top_name(), Some("Menu_Records"));
    }

    #[test]
    fn click_outside_options_does_nothing() {
        let (mut stack, mut resources) = setup();

        let input = frame(&[
            InputEvent::MouseMoved { x: 5.0, y: 5.0 },
            InputEvent::MouseButtonDown { button: MouseButton::Left },
        ]);
        stack.update(&mut resources, &input, 0.016);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn keyboard_selection_wraps_and_activates() {
        let (mut stack, mut resources) = setup();

        // Up from nothing lands on the last option
        stack.update(&mut resources, &frame(&[InputEvent::KeyDown { key: KeyCode::ArrowUp }]), 0.016);
        stack.update(&mut resources, &frame(&[InputEvent::KeyDown { key: KeyCode::Enter }]), 0.016);

        assert!(resources.quit_requested());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn escape_from_submenu_returns_to_title() {
        let (mut stack, mut resources) = setup();

        stack.update(&mut resources, &frame(&[InputEvent::KeyDown { key: KeyCode::ArrowDown }]), 0.016);
        stack.update(&mut resources, &frame(&[InputEvent::KeyDown { key: KeyCode::Enter }]), 0.016);
        assert_eq!(stack.top_name(), Some("Menu_Play"));

        stack.update(&mut resources, &frame(&[InputEvent::KeyDown { key: KeyCode::Escape }]), 0.016);
        assert_eq!(stack.top_name(), Some("Menu_Title"));
    }
}
