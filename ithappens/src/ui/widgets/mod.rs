//! TUI widgets for the reader

pub mod error_panel;
pub mod jump_prompt;
pub mod loading;
pub mod status_bar;
pub mod story;

pub use error_panel::ErrorPanelWidget;
pub use jump_prompt::JumpPromptWidget;
pub use loading::LoadingWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use story::StoryWidget;
