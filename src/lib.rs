//! An interactive three-state Conway's Game of Life sandbox.

pub mod board;
pub mod canvas;
pub mod enc;
pub mod engine;
pub mod error;
pub mod frame;
pub mod game;
pub mod input;
pub mod pos;
pub mod render;
pub mod stats;

pub use board::{Board, Cell};
pub use canvas::{Rgba, Surface};
pub use enc::{Pattern, PatternCodec, RunLengthEncoded};
pub use engine::GameOfLife;
pub use error::{Error, Result};
pub use frame::{FrameLoop, Host};
pub use game::{Control, Game, SimulationParameters};
pub use input::{FrameInput, Key, MouseState};
pub use pos::Pos2;
pub use render::Renderer;
