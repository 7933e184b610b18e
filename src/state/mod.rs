// State management module
// Handles the workbench, UI state and user actions

pub mod app_state;

pub use app_state::{AppState, Outbound, UiAction};
