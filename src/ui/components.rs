// Reusable UI components
// Provides common UI elements for the application

use agent_chat_client::format::{format_file_count, format_file_size};
use agent_chat_client::panel::PanelStatus;
use agent_chat_client::store::FileSummary;
use agent_chat_client::{AgentType, Message, MessageRole};
use eframe::egui;

/// Accent color per agent: global (cyan), RAG (purple), web search (green)
pub fn agent_color(agent: AgentType) -> egui::Color32 {
    match agent {
        AgentType::Global => egui::Color32::from_rgb(34, 211, 238),
        AgentType::Rag => egui::Color32::from_rgb(192, 132, 252),
        AgentType::WebSearch => egui::Color32::from_rgb(74, 222, 128),
    }
}

/// Short symbol shown next to agent names
pub fn agent_icon(agent: AgentType) -> &'static str {
    match agent {
        AgentType::Global => "✨",
        AgentType::Rag => "📖",
        AgentType::WebSearch => "🌐",
    }
}

/// Render a status badge with colored text (no background bar)
pub fn status_badge(ui: &mut egui::Ui, status: PanelStatus) {
    match status {
        PanelStatus::Idle => {
            ui.colored_label(egui::Color32::GRAY, status.label());
        }
        PanelStatus::Busy(label) => {
            ui.spinner();
            ui.colored_label(egui::Color32::from_rgb(220, 180, 0), label);
        }
    }
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    ui.add_enabled(enabled, egui::Button::new(egui::RichText::new(text).strong()))
}

/// `"📄 2 files (3.5 MB)"` line under the chat header
pub fn file_summary_label(ui: &mut egui::Ui, files: &FileSummary) {
    ui.label(
        egui::RichText::new(format!("📄 {}", format_file_count(files.count, files.total_size)))
            .weak()
            .size(12.0),
    );
}

/// Single file row: name and size
pub fn file_row(ui: &mut egui::Ui, name: &str, size: u64) {
    ui.label(name);
    ui.label(egui::RichText::new(format_file_size(size)).weak().size(12.0));
}

/// Render one chat message as a bubble
pub fn message_bubble(ui: &mut egui::Ui, message: &Message, accent: egui::Color32) {
    let (layout, fill) = match message.role {
        MessageRole::User => (
            egui::Layout::right_to_left(egui::Align::TOP),
            accent.linear_multiply(0.25),
        ),
        MessageRole::Assistant => (
            egui::Layout::left_to_right(egui::Align::TOP),
            ui.visuals().faint_bg_color,
        ),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(10.0))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.vertical(|ui| match message.role {
                    MessageRole::User => {
                        ui.label(&message.content);
                    }
                    MessageRole::Assistant => render_markdown(ui, &message.content),
                });
            });
    });
}

/// Kind of a line in a markdown reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# Title`
    Heading(&'a str),
    /// `## Section` and deeper levels
    Subheading(&'a str),
    /// `- item` or `1. item`
    Bullet(&'a str),
    /// `> quote`
    Quote(&'a str),
    /// Line inside a fenced code block
    Code(&'a str),
    /// Opening or closing fence
    Fence,
    /// `| a | b |`
    TableRow(&'a str),
    /// `|---|---|` under a table header
    TableRule,
    /// Anything else
    Text(&'a str),
}

/// Classify the lines of `text`, tracking fenced code blocks
pub fn classify_lines(text: &str) -> Vec<LineKind<'_>> {
    let mut in_code = false;
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") {
                in_code = !in_code;
                return LineKind::Fence;
            }
            if in_code {
                return LineKind::Code(line);
            }
            if let Some((level, rest)) = heading(trimmed) {
                if level == 1 {
                    LineKind::Heading(rest)
                } else {
                    LineKind::Subheading(rest)
                }
            } else if trimmed.starts_with('|') {
                if is_table_rule(trimmed) {
                    LineKind::TableRule
                } else {
                    LineKind::TableRow(trimmed.trim_end())
                }
            } else if let Some(rest) = trimmed.strip_prefix("> ") {
                LineKind::Quote(rest)
            } else if let Some(rest) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                LineKind::Bullet(rest)
            } else if is_numbered_item(trimmed) {
                LineKind::Bullet(trimmed)
            } else {
                LineKind::Text(line)
            }
        })
        .collect()
}

/// `#` through `######` followed by a space
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..].strip_prefix(' ').map(|rest| (level, rest))
}

fn is_table_rule(line: &str) -> bool {
    line.contains('-') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn is_numbered_item(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// Render a markdown reply with headings, lists, quotes and code blocks
pub fn render_markdown(ui: &mut egui::Ui, text: &str) {
    for kind in classify_lines(text) {
        match kind {
            LineKind::Heading(t) => {
                ui.label(egui::RichText::new(strip_emphasis(t)).strong().size(18.0));
            }
            LineKind::Subheading(t) => {
                ui.label(egui::RichText::new(strip_emphasis(t)).strong().size(15.0));
            }
            LineKind::Bullet(t) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    ui.label(strip_emphasis(t));
                });
            }
            LineKind::Quote(t) => {
                ui.label(egui::RichText::new(strip_emphasis(t)).italics().weak());
            }
            LineKind::Code(t) => {
                ui.label(egui::RichText::new(t).monospace().size(12.0));
            }
            LineKind::Fence => {}
            LineKind::TableRow(t) => {
                ui.label(egui::RichText::new(strip_emphasis(t)).monospace().size(12.0));
            }
            LineKind::TableRule => {
                ui.separator();
            }
            LineKind::Text(t) => {
                ui.label(strip_emphasis(t));
            }
        }
    }
}

/// Drop `**` markers; egui labels cannot mix weights inline
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}
