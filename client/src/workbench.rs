//! Workbench
//!
//! Everything the front end shows, in one place: the conversation store,
//! one panel per agent and the active tab. The front end turns user input
//! into calls on [`Workbench`] and feeds finished requests back through
//! [`Workbench::apply_event`].

use crate::api::{ChatResponse, IngestReport};
use crate::dispatch::ApiEvent;
use crate::error::{ApiError, SelectionError};
use crate::history::{self, HistoryEntry};
use crate::panel::{AgentPanel, PendingChat, PendingIngest, SelectedFile};
use crate::store::{AgentType, ConversationStore, PersistenceError, StoreFile};
use std::path::Path;
use std::time::{Duration, Instant};

/// Conversation store plus the three agent panels
#[derive(Debug, Clone)]
pub struct Workbench {
    store: ConversationStore,
    panels: Vec<AgentPanel>,
    active_tab: AgentType,
}

impl Workbench {
    /// Wrap `store`
    ///
    /// Starts on the tab of the store's current conversation, or the global
    /// tab when there is none. The current conversation is kept.
    pub fn new(store: ConversationStore, progress_interval: Duration) -> Self {
        let mut panels: Vec<AgentPanel> = AgentType::ALL
            .iter()
            .map(|agent| AgentPanel::new(*agent, progress_interval))
            .collect();
        let active_tab = store
            .current_conversation()
            .map(|c| c.agent_type)
            .unwrap_or(AgentType::Global);
        panels[panel_index(active_tab)].sync_with_store(&store);
        Self {
            store,
            panels,
            active_tab,
        }
    }

    /// Conversation store (read-only)
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Tab currently shown
    pub fn active_tab(&self) -> AgentType {
        self.active_tab
    }

    /// Panel for `agent`
    pub fn panel(&self, agent: AgentType) -> &AgentPanel {
        &self.panels[panel_index(agent)]
    }

    /// Mutable panel for `agent` (input text, schema editor)
    pub fn panel_mut(&mut self, agent: AgentType) -> &mut AgentPanel {
        &mut self.panels[panel_index(agent)]
    }

    /// Switch tabs
    ///
    /// A current conversation that belongs to another agent is deselected,
    /// so the new tab starts from its input view.
    pub fn select_tab(&mut self, agent: AgentType) {
        let other_agent = self
            .store
            .current_conversation()
            .is_some_and(|c| c.agent_type != agent);
        if other_agent {
            self.store.set_current_conversation_id(None);
        }
        self.active_tab = agent;
        self.panels[panel_index(agent)].sync_with_store(&self.store);
    }

    /// Open a conversation from the history list and show its agent tab
    ///
    /// Returns `false` if the conversation does not exist.
    pub fn open_conversation(&mut self, id: &str) -> bool {
        match history::select_conversation(&mut self.store, id) {
            Some(agent) => {
                self.active_tab = agent;
                self.panels[panel_index(agent)].sync_with_store(&self.store);
                true
            }
            None => false,
        }
    }

    /// History rows, newest first
    pub fn history(&self, now_ms: i64) -> Vec<HistoryEntry> {
        history::history_entries(&self.store, now_ms)
    }

    /// Return `agent`'s panel to its input view
    pub fn back(&mut self, agent: AgentType) {
        self.panels[panel_index(agent)].back();
    }

    /// Add a document to the RAG selection
    pub fn add_document(&mut self, path: &Path) -> Result<(), SelectionError> {
        self.panels[panel_index(AgentType::Rag)].add_document(path)
    }

    /// Remove a document from the RAG selection
    pub fn remove_document(&mut self, index: usize) -> Option<SelectedFile> {
        self.panels[panel_index(AgentType::Rag)].remove_document(index)
    }

    /// Record `agent`'s input as a user message and return the request to send
    pub fn begin_submit(&mut self, agent: AgentType) -> Option<PendingChat> {
        self.panels[panel_index(agent)].begin_submit(&mut self.store)
    }

    /// Apply a chat outcome
    pub fn finish_submit(
        &mut self,
        agent: AgentType,
        conversation_id: &str,
        outcome: Result<ChatResponse, ApiError>,
    ) {
        self.panels[panel_index(agent)].finish_submit(&mut self.store, conversation_id, outcome);
    }

    /// Start a vector database generation for the RAG selection
    pub fn begin_vector_db(&mut self, now: Instant) -> Option<PendingIngest> {
        self.panels[panel_index(AgentType::Rag)].begin_vector_db(&mut self.store, now)
    }

    /// Apply a vector database generation outcome
    pub fn finish_vector_db(
        &mut self,
        agent: AgentType,
        conversation_id: &str,
        revision: u64,
        report: IngestReport,
    ) {
        self.panels[panel_index(agent)].finish_vector_db(
            &mut self.store,
            conversation_id,
            revision,
            report,
        );
    }

    /// Apply a finished background request
    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::ChatFinished {
                agent,
                conversation_id,
                outcome,
            } => self.finish_submit(agent, &conversation_id, outcome),
            ApiEvent::IngestFinished {
                agent,
                conversation_id,
                revision,
                report,
            } => self.finish_vector_db(agent, &conversation_id, revision, report),
        }
    }

    /// True while any panel waits on the backend
    pub fn is_busy(&self) -> bool {
        self.panels.iter().any(AgentPanel::is_busy)
    }

    /// Persist the store to `path`
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        StoreFile::save_store(&self.store, path)
    }
}

fn panel_index(agent: AgentType) -> usize {
    match agent {
        AgentType::Global => 0,
        AgentType::Rag => 1,
        AgentType::WebSearch => 2,
    }
}
