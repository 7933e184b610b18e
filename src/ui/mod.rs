// UI module
// Contains layout, components, and UI-related functionality

pub mod agent_view;
pub mod components;
pub mod history;
pub mod layout;

pub use layout::render_app_layout;
