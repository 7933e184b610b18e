// Agent view
// Input screen and chat screen for the active agent tab

use crate::state::{AppState, UiAction};
use crate::ui::components::*;
use agent_chat_client::panel::{AgentPanel, PanelMode};
use agent_chat_client::AgentType;
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

fn description(agent: AgentType) -> &'static str {
    match agent {
        AgentType::Global => "General-purpose assistant for any question.",
        AgentType::Rag => "Upload documents, build a vector database, then ask about them.",
        AgentType::WebSearch => "Searches the web and structures what it finds.",
    }
}

fn placeholder(agent: AgentType, mode: PanelMode) -> &'static str {
    match (agent, mode) {
        (_, PanelMode::Chat) => "Type a message...",
        (AgentType::Global, PanelMode::Input) => "Ask me anything...",
        (AgentType::Rag, PanelMode::Input) => "Ask about your documents...",
        (AgentType::WebSearch, PanelMode::Input) => "Search the web...",
    }
}

/// Render the active agent tab
pub fn render_agent_view(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let agent = state.workbench.active_tab();
    match state.workbench.panel(agent).mode() {
        PanelMode::Input => render_input_view(ui, state, agent, actions),
        PanelMode::Chat => render_chat_view(ui, state, agent, actions),
    }
}

fn render_input_view(
    ui: &mut egui::Ui,
    state: &mut AppState,
    agent: AgentType,
    actions: &mut Vec<UiAction>,
) {
    let accent = agent_color(agent);
    ui.vertical(|ui| {
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new(format!("{} {}", agent_icon(agent), agent.display_name()))
                    .color(accent)
                    .size(22.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                status_badge(ui, state.workbench.panel(agent).status());
            });
        });
        ui.label(egui::RichText::new(description(agent)).weak());
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(12.0);

        match agent {
            AgentType::Rag => render_documents(ui, state, actions),
            AgentType::WebSearch => render_schema_editor(ui, state, actions),
            AgentType::Global => {}
        }

        ui.add_space(12.0);
        render_input_row(ui, state.workbench.panel_mut(agent), actions);
    });
}

fn render_documents(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let panel = state.workbench.panel(AgentType::Rag);
    let can_generate = panel.can_generate_vector_db();
    let Some(docs) = panel.documents() else {
        return;
    };

    ui.label(egui::RichText::new("Documents").strong().size(15.0));
    ui.label(
        egui::RichText::new("Drop TXT, PDF, DOCX, CSV or XLSX files onto the window, or enter a path.")
            .weak()
            .size(12.0),
    );
    ui.add_space(6.0);

    for (index, file) in docs.files().iter().enumerate() {
        ui.horizontal(|ui| {
            file_row(ui, &file.name, file.size);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    actions.push(UiAction::RemoveDocument(index));
                }
            });
        });
    }

    let now = Instant::now();
    if let Some(progress) = docs.progress() {
        ui.add_space(6.0);
        ui.add(
            egui::ProgressBar::new(f32::from(progress.percent_at(now)) / 100.0)
                .text(progress.label_at(now))
                .animate(true),
        );
    } else if docs.is_generated() {
        ui.colored_label(egui::Color32::from_rgb(0, 200, 0), "✔ Vector database ready");
    }
    if let Some(error) = docs.last_error() {
        ui.colored_label(egui::Color32::from_rgb(220, 0, 0), error);
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let field = ui.add(
            egui::TextEdit::singleline(&mut state.ui_state.document_path)
                .hint_text("/path/to/document.pdf")
                .desired_width(320.0),
        );
        let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let path = state.ui_state.document_path.trim();
        if (ui.button("Add").clicked() || entered) && !path.is_empty() {
            actions.push(UiAction::AddDocument(PathBuf::from(path)));
        }
    });

    ui.add_space(6.0);
    if primary_button(ui, "Generate vector database", can_generate).clicked() {
        actions.push(UiAction::GenerateVectorDb);
    }
}

fn render_schema_editor(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let Some(schema) = state.workbench.panel_mut(AgentType::WebSearch).schema_mut() else {
        return;
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Output schema").strong().size(15.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Suggest schema").clicked() {
                actions.push(UiAction::SuggestSchema);
            }
        });
    });
    ui.add(
        egui::TextEdit::multiline(&mut schema.text)
            .hint_text("Enter JSON schema for search results...")
            .desired_rows(6)
            .desired_width(f32::INFINITY)
            .code_editor(),
    );
}

fn render_input_row(ui: &mut egui::Ui, panel: &mut AgentPanel, actions: &mut Vec<UiAction>) {
    let agent = panel.agent();
    let busy = panel.is_busy();
    let mode = panel.mode();
    ui.horizontal(|ui| {
        let field = ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(&mut panel.input)
                .hint_text(placeholder(agent, mode))
                .desired_width(ui.available_width() - 70.0),
        );
        let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if primary_button(ui, "Send ➤", !busy).clicked() || (entered && !busy) {
            actions.push(UiAction::Submit(agent));
        }
    });
}

fn render_chat_view(
    ui: &mut egui::Ui,
    state: &mut AppState,
    agent: AgentType,
    actions: &mut Vec<UiAction>,
) {
    let accent = agent_color(agent);
    let conversation = state
        .workbench
        .store()
        .current_conversation()
        .filter(|c| c.agent_type == agent)
        .cloned();

    ui.horizontal(|ui| {
        if ui.button("⬅ Back").clicked() {
            actions.push(UiAction::Back(agent));
        }
        ui.add_space(8.0);
        ui.heading(egui::RichText::new(agent.display_name()).color(accent));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            status_badge(ui, state.workbench.panel(agent).status());
        });
    });
    if let Some(files) = conversation.as_ref().and_then(|c| c.files.as_ref()) {
        file_summary_label(ui, files);
    }
    ui.separator();

    let input_height = 40.0;
    egui::ScrollArea::vertical()
        .id_source("chat_scroll")
        .auto_shrink([false; 2])
        .max_height(ui.available_height() - input_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            match &conversation {
                Some(conversation) => {
                    for message in &conversation.messages {
                        message_bubble(ui, message, accent);
                        ui.add_space(8.0);
                    }
                }
                None => {
                    ui.label(egui::RichText::new("No messages yet").italics().weak());
                }
            }
            if let agent_chat_client::panel::PanelStatus::Busy(label) =
                state.workbench.panel(agent).status()
            {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new(format!("{}...", label)).weak());
                });
            }
        });

    ui.separator();
    render_input_row(ui, state.workbench.panel_mut(agent), actions);
}
