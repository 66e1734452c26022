pub mod cli;
pub mod events;
pub mod fullscreen;
pub mod input_handler;
pub mod keys;
pub mod state;
pub mod tmux;

pub use state::*;
