//=========================================================================
// Greedy Gardens: Library Root
//
// Menu runtime for Greedy Gardens.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`, `GameConfig`)
// - Expose the core systems (tweens, state stack, spawner) and the
//   menu content built on them
// - Keep the windowing layer (`platform`) private
//
// Typical usage:
// ```no_run
// use greedy_gardens::EngineBuilder;
// use greedy_gardens::game::menu_bootstrap;
//
// fn main() {
//     EngineBuilder::new().build().run(menu_bootstrap);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine systems: input, tweening, state stack, spawner
// and the core thread loop.
//
// `game` is the menu content. `render` and `resources` are the surfaces
// and collaborators every state draws with.
//
pub mod core;
pub mod error;
pub mod game;
pub mod prelude;
pub mod render;
pub mod resources;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop and the pixels presenter, and only
// talks to the core through channels.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, GameConfig};
pub use error::GameError;
