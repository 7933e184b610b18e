// Application state management
// Wraps the client workbench with UI-only state and autosave

use agent_chat_client::dispatch::ApiEvent;
use agent_chat_client::panel::{PendingChat, PendingIngest};
use agent_chat_client::{AgentType, Workbench};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Something the user did this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Switch to an agent tab
    SelectTab(AgentType),
    /// Open a conversation from the history panel
    OpenConversation(String),
    /// Send the agent's input text
    Submit(AgentType),
    /// Leave the chat view
    Back(AgentType),
    /// Add a document to the RAG selection
    AddDocument(PathBuf),
    /// Remove a document from the RAG selection
    RemoveDocument(usize),
    /// Upload the selection and build the vector database
    GenerateVectorDb,
    /// Fill the schema editor with the template
    SuggestSchema,
    /// Show or hide the history panel
    ToggleHistory,
    /// Write the store to disk now
    Save,
}

/// Request the app must hand to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Chat message
    Chat(PendingChat),
    /// Vector database generation
    Ingest(PendingIngest),
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the history panel is visible
    pub history_visible: bool,
    /// Path typed into the "add document" field
    pub document_path: String,
    /// Last problem worth showing in the status bar
    pub notice: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            history_visible: true,
            document_path: String::new(),
            notice: None,
        }
    }
}

/// Main application state
pub struct AppState {
    /// Store, panels and active tab
    pub workbench: Workbench,
    /// UI state preferences
    pub ui_state: UiState,
    store_path: PathBuf,
    saved_revision: u64,
}

impl AppState {
    /// Wrap a workbench whose store lives at `store_path`
    pub fn new(workbench: Workbench, store_path: PathBuf) -> Self {
        let saved_revision = workbench.store().revision();
        Self {
            workbench,
            ui_state: UiState::default(),
            store_path,
            saved_revision,
        }
    }

    /// Apply a user action; returns the request to dispatch, if any
    pub fn apply(&mut self, action: UiAction, now: Instant) -> Option<Outbound> {
        match action {
            UiAction::SelectTab(agent) => self.workbench.select_tab(agent),
            UiAction::OpenConversation(id) => {
                if !self.workbench.open_conversation(&id) {
                    warn!(conversation_id = %id, "Selected conversation no longer exists");
                }
            }
            UiAction::Submit(agent) => {
                return self.workbench.begin_submit(agent).map(Outbound::Chat);
            }
            UiAction::Back(agent) => self.workbench.back(agent),
            UiAction::AddDocument(path) => match self.workbench.add_document(&path) {
                Ok(()) => {
                    self.ui_state.document_path.clear();
                    self.ui_state.notice = None;
                }
                Err(e) => self.ui_state.notice = Some(e.to_string()),
            },
            UiAction::RemoveDocument(index) => {
                self.workbench.remove_document(index);
            }
            UiAction::GenerateVectorDb => {
                return self.workbench.begin_vector_db(now).map(Outbound::Ingest);
            }
            UiAction::SuggestSchema => {
                if let Some(schema) = self.workbench.panel_mut(AgentType::WebSearch).schema_mut() {
                    schema.apply_suggested();
                }
            }
            UiAction::ToggleHistory => {
                self.ui_state.history_visible = !self.ui_state.history_visible;
            }
            UiAction::Save => self.save(),
        }
        None
    }

    /// Apply a finished background request
    pub fn apply_event(&mut self, event: ApiEvent) {
        self.workbench.apply_event(event);
    }

    /// Persist the store if it changed since the last save
    pub fn autosave(&mut self) {
        if self.workbench.store().revision() != self.saved_revision {
            self.save();
        }
    }

    fn save(&mut self) {
        match self.workbench.save(&self.store_path) {
            Ok(()) => {
                self.saved_revision = self.workbench.store().revision();
                info!(path = %self.store_path.display(), "Conversations saved");
            }
            Err(e) => {
                // Not written again until the store changes
                self.saved_revision = self.workbench.store().revision();
                error!(path = %self.store_path.display(), error = %e, "Failed to save conversations");
                self.ui_state.notice = Some(format!("Could not save conversations: {}", e));
            }
        }
    }
}
