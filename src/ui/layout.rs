// Main application layout
// Handles window layout, panels, menu bar, and overall UI structure

use crate::state::{AppState, UiAction};
use crate::ui::agent_view::render_agent_view;
use crate::ui::components::{agent_color, agent_icon};
use crate::ui::history::render_history_panel;
use agent_chat_client::AgentType;
use eframe::egui;

/// Render the main application layout
/// Includes menu bar, agent tabs, status bar, history panel and the active agent
///
/// Returns the actions the user triggered this frame.
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState) -> Vec<UiAction> {
    let mut actions = Vec::new();

    render_menu_bar(ctx, state, &mut actions);
    render_tab_bar(ctx, state, &mut actions);
    render_status_bar(ctx, state);

    if state.ui_state.history_visible {
        render_history_panel(ctx, state, &mut actions);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        render_agent_view(ui, state, &mut actions);
    });

    actions
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("Save").clicked() {
                    actions.push(UiAction::Save);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
                let mut history_visible = state.ui_state.history_visible;
                if ui.checkbox(&mut history_visible, "Conversations").changed() {
                    actions.push(UiAction::ToggleHistory);
                }
            });
        });
    });
}

/// Render one tab per agent
fn render_tab_bar(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    let active = state.workbench.active_tab();
    egui::TopBottomPanel::top("agent_tabs").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            for agent in AgentType::ALL {
                let text = egui::RichText::new(format!("{} {}", agent_icon(agent), agent.display_name()))
                    .color(agent_color(agent))
                    .size(15.0);
                if ui.selectable_label(agent == active, text).clicked() && agent != active {
                    actions.push(UiAction::SelectTab(agent));
                }
                ui.add_space(8.0);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !state.ui_state.history_visible && ui.button("🗂 Conversations").clicked() {
                    actions.push(UiAction::ToggleHistory);
                }
            });
        });
        ui.add_space(4.0);
    });
}

/// Render the bottom status bar (notices, busy agents)
fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if let Some(notice) = &state.ui_state.notice {
                ui.colored_label(egui::Color32::from_rgb(220, 180, 0), notice);
            } else {
                ui.label(
                    egui::RichText::new(format!(
                        "{} conversations",
                        state.workbench.store().len()
                    ))
                    .weak()
                    .small(),
                );
            }
        });
    });
}
