// Conversation history panel
// Right-hand list of every conversation, newest first

use crate::state::{AppState, UiAction};
use crate::ui::components::{agent_color, agent_icon};
use agent_chat_client::history::{EMPTY_HISTORY_HINT, EMPTY_HISTORY_TITLE};
use eframe::egui;

/// Render the history side panel
pub fn render_history_panel(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    egui::SidePanel::right("history_panel")
        .resizable(true)
        .default_width(300.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Conversations");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        actions.push(UiAction::ToggleHistory);
                    }
                });
            });
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);

            let entries = state
                .workbench
                .history(chrono::Utc::now().timestamp_millis());

            egui::ScrollArea::vertical()
                .id_source("history_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if entries.is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label(
                                egui::RichText::new(EMPTY_HISTORY_TITLE)
                                    .italics()
                                    .weak()
                                    .size(14.0),
                            );
                            ui.add_space(8.0);
                            ui.label(egui::RichText::new(EMPTY_HISTORY_HINT).weak().size(12.0));
                        });
                        return;
                    }

                    for entry in entries {
                        let accent = agent_color(entry.agent_type);
                        let mut frame = egui::Frame::none()
                            .rounding(egui::Rounding::same(6.0))
                            .inner_margin(egui::Margin::same(8.0))
                            .stroke(egui::Stroke::new(1.0, accent.linear_multiply(0.4)));
                        if entry.is_current {
                            frame = frame.fill(ui.visuals().selection.bg_fill);
                        }

                        let row = frame.show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.colored_label(accent, agent_icon(entry.agent_type));
                                ui.label(
                                    egui::RichText::new(entry.agent_type.display_name())
                                        .size(12.0),
                                );
                            });
                            ui.label(egui::RichText::new(&entry.title).strong());
                            if let Some(files) = &entry.files_label {
                                ui.label(
                                    egui::RichText::new(format!("📄 {}", files))
                                        .weak()
                                        .size(11.0),
                                );
                            }
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&entry.message_count_label)
                                        .weak()
                                        .size(11.0),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.label(
                                            egui::RichText::new(&entry.age_label)
                                                .weak()
                                                .size(11.0),
                                        );
                                    },
                                );
                            });
                        });

                        let click = ui.interact(
                            row.response.rect,
                            ui.id().with(("history_row", &entry.id)),
                            egui::Sense::click(),
                        );
                        if click.clicked() {
                            actions.push(UiAction::OpenConversation(entry.id.clone()));
                        }
                        ui.add_space(6.0);
                    }
                });
        });
}
