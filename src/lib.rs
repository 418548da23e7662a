// termfolio library - exposes all core modules for testing

// Schema-only modules (always available, for generate_schema)
pub mod card;
pub mod config;
pub mod content;
pub mod state;

// Runtime modules (terminal UI)
#[cfg(feature = "runtime")]
pub mod app;
#[cfg(feature = "runtime")]
pub mod config_io;
#[cfg(feature = "runtime")]
pub mod input;
#[cfg(feature = "runtime")]
pub mod navigation;
#[cfg(feature = "runtime")]
pub mod services;
#[cfg(feature = "runtime")]
pub mod view;
