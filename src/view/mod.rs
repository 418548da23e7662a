//! View and UI layer
//!
//! This module contains all presentation and rendering components.

pub mod blocks;
pub mod card;
pub mod header;
pub mod overlay;
pub mod page;
pub mod status;
pub mod theme;
pub mod wrap;
