pub mod actions;
pub mod keybindings;
pub mod listeners;

pub use actions::Action;
