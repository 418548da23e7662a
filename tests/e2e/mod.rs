pub mod expand;
pub mod links;
pub mod mouse;
pub mod restore;
