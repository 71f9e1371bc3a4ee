//! Top-down shooting range: navigate a maze, shoot every target, and
//! don't walk into one that is still standing.
//!
//! - `geometry`, `maps`, `entities`, `compute`: pure simulation
//! - `session`: map selection, countdown, restart
//! - `render`: presentation against an abstract `Renderer`
//! - `display`, `input`: the crossterm terminal backend

pub mod assets;
pub mod compute;
pub mod constants;
pub mod display;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod maps;
pub mod render;
pub mod session;
