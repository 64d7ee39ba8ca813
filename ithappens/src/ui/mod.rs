//! UI module for the story reader

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::Overlay;
