// Agent panel
// Per-agent controller: input/chat mode, busy status and the submit protocol

use super::documents::{DocumentSet, SelectedFile};
use super::schema::{extract_schema_marker, SearchSchema};
use crate::api::ingest::{ingest_paths, IngestReport};
use crate::api::{AgentApi, ChatRequest, ChatResponse};
use crate::error::{ApiError, SelectionError};
use crate::store::{AgentType, ConversationId, ConversationStore, FileSummary, Message};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Assistant message shown when the backend could not be reached
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

/// Busy label while a vector database is being generated
pub const GENERATING_VECTOR_DB: &str = "generating vector database";

/// Which view a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// Composing a new query
    Input,
    /// Viewing and continuing a conversation
    Chat,
}

/// Whether a panel is waiting on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    /// Ready for input
    Idle,
    /// A request is in flight; the label describes it
    Busy(&'static str),
}

impl PanelStatus {
    /// Text shown next to the chat header
    pub fn label(&self) -> &'static str {
        match self {
            PanelStatus::Idle => "idle",
            PanelStatus::Busy(label) => label,
        }
    }
}

/// Agent-specific panel state
#[derive(Debug, Clone)]
pub enum PanelKind {
    /// Global agent, no extras
    Global,
    /// RAG agent with its document selection
    Rag(DocumentSet),
    /// Web search agent with its schema editor
    WebSearch(SearchSchema),
}

/// A chat request that has been recorded locally and must be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    /// Agent to send to
    pub agent: AgentType,
    /// Conversation the reply belongs to
    pub conversation_id: ConversationId,
    /// Request body
    pub request: ChatRequest,
}

/// A vector database generation that must be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIngest {
    /// Agent to send to
    pub agent: AgentType,
    /// Conversation the documents are attached to
    pub conversation_id: ConversationId,
    /// Selection revision the run was started for
    pub revision: u64,
    /// `(name, path)` of each file to upload
    pub files: Vec<(String, std::path::PathBuf)>,
}

/// Busy label while waiting for a chat reply
pub fn busy_label(agent: AgentType) -> &'static str {
    match agent {
        AgentType::Global => "processing your request",
        AgentType::Rag => "retrieving relevant documents",
        AgentType::WebSearch => "searching the web",
    }
}

/// Controller for one agent tab
#[derive(Debug, Clone)]
pub struct AgentPanel {
    agent: AgentType,
    mode: PanelMode,
    status: PanelStatus,
    kind: PanelKind,
    /// Text currently typed in the input field
    pub input: String,
}

impl AgentPanel {
    /// Create the panel for `agent`
    pub fn new(agent: AgentType, progress_interval: Duration) -> Self {
        let kind = match agent {
            AgentType::Global => PanelKind::Global,
            AgentType::Rag => PanelKind::Rag(DocumentSet::new(progress_interval)),
            AgentType::WebSearch => PanelKind::WebSearch(SearchSchema::default()),
        };
        Self {
            agent,
            mode: PanelMode::Input,
            status: PanelStatus::Idle,
            kind,
            input: String::new(),
        }
    }

    /// Agent this panel talks to
    pub fn agent(&self) -> AgentType {
        self.agent
    }

    /// Current view
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    /// Current busy status
    pub fn status(&self) -> PanelStatus {
        self.status
    }

    /// True while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.status != PanelStatus::Idle
    }

    /// RAG document selection
    pub fn documents(&self) -> Option<&DocumentSet> {
        match &self.kind {
            PanelKind::Rag(docs) => Some(docs),
            _ => None,
        }
    }

    /// Web search schema editor
    pub fn schema(&self) -> Option<&SearchSchema> {
        match &self.kind {
            PanelKind::WebSearch(schema) => Some(schema),
            _ => None,
        }
    }

    /// Mutable web search schema editor
    pub fn schema_mut(&mut self) -> Option<&mut SearchSchema> {
        match &mut self.kind {
            PanelKind::WebSearch(schema) => Some(schema),
            _ => None,
        }
    }

    /// Add a local file to the RAG selection
    pub fn add_document(&mut self, path: &Path) -> Result<(), SelectionError> {
        let PanelKind::Rag(docs) = &mut self.kind else {
            return Err(SelectionError::NoDocumentSupport);
        };
        let result = SelectedFile::from_path(path).and_then(|file| docs.add(file));
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "Document not added");
        }
        result
    }

    /// Remove a file from the RAG selection
    pub fn remove_document(&mut self, index: usize) -> Option<SelectedFile> {
        match &mut self.kind {
            PanelKind::Rag(docs) => docs.remove(index),
            _ => None,
        }
    }

    /// Go back to the input view
    ///
    /// The conversation stays in the store; transient schema text is dropped.
    pub fn back(&mut self) {
        self.mode = PanelMode::Input;
        if let PanelKind::WebSearch(schema) = &mut self.kind {
            schema.clear();
        }
    }

    /// Align the view with the store's current conversation
    ///
    /// Called when the host changes the current conversation (history
    /// selection, tab switch).
    pub fn sync_with_store(&mut self, store: &ConversationStore) {
        let current = store
            .current_conversation()
            .filter(|c| c.agent_type == self.agent);
        match (current, &mut self.kind) {
            (Some(conversation), PanelKind::Rag(docs)) => {
                if conversation.messages.is_empty() {
                    self.mode = PanelMode::Input;
                } else {
                    self.mode = PanelMode::Chat;
                    if conversation.files.is_some() {
                        docs.mark_generated();
                    }
                }
            }
            (Some(_), _) => self.mode = PanelMode::Chat,
            (None, _) => self.mode = PanelMode::Input,
        }
    }

    /// Record the user's message and prepare the chat request
    ///
    /// Returns `None` when the input is blank or a request is already in
    /// flight. On `Some`, the panel is busy until [`Self::finish_submit`].
    pub fn begin_submit(&mut self, store: &mut ConversationStore) -> Option<PendingChat> {
        if self.is_busy() || self.input.trim().is_empty() {
            return None;
        }

        let (message, schema) = match (&self.kind, self.mode) {
            (PanelKind::WebSearch(schema), PanelMode::Input) => {
                (self.input.clone(), Some(schema.for_initial_query()))
            }
            (PanelKind::WebSearch(_), PanelMode::Chat) => {
                let (query, schema) = extract_schema_marker(&self.input);
                (query, Some(schema.unwrap_or_default()))
            }
            _ => (self.input.clone(), None),
        };

        let conversation_id = self.resolve_conversation(store, true);
        if let Err(e) = store.add_message(&conversation_id, Message::user(message.clone())) {
            warn!(conversation_id = %conversation_id, error = %e, "User message not recorded");
        }
        self.status = PanelStatus::Busy(busy_label(self.agent));

        info!(conversation_id = %conversation_id, agent = %self.agent, "Sending chat message");
        Some(PendingChat {
            agent: self.agent,
            conversation_id: conversation_id.clone(),
            request: ChatRequest {
                message,
                conversation_id,
                schema,
            },
        })
    }

    /// Record the outcome of a chat request and return to idle
    pub fn finish_submit(
        &mut self,
        store: &mut ConversationStore,
        conversation_id: &str,
        outcome: Result<ChatResponse, ApiError>,
    ) {
        let reply = match outcome {
            Ok(response) if response.is_success() => response.response.unwrap_or_default(),
            Ok(response) => format!(
                "Error: {}",
                response
                    .response
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "unknown".to_string())
            ),
            Err(e) => {
                error!(
                    conversation_id = %conversation_id,
                    agent = %self.agent,
                    error = %e,
                    "Chat request failed"
                );
                FALLBACK_REPLY.to_string()
            }
        };

        if let Err(e) = store.add_message(conversation_id, Message::assistant(reply)) {
            warn!(conversation_id = %conversation_id, error = %e, "Assistant reply dropped");
        }
        self.status = PanelStatus::Idle;
        self.input.clear();
        self.mode = PanelMode::Chat;
    }

    /// Run the whole submit protocol against `api`
    ///
    /// Returns `false` if nothing was sent.
    pub async fn submit(&mut self, store: &mut ConversationStore, api: &dyn AgentApi) -> bool {
        let Some(pending) = self.begin_submit(store) else {
            return false;
        };
        let outcome = api.chat(pending.agent, &pending.request).await;
        self.finish_submit(store, &pending.conversation_id, outcome);
        true
    }

    /// True if "Generate vector database" should be enabled
    pub fn can_generate_vector_db(&self) -> bool {
        !self.is_busy() && self.documents().is_some_and(|docs| docs.can_generate())
    }

    /// Prepare a vector database generation for the selected documents
    ///
    /// Returns `None` unless [`Self::can_generate_vector_db`] holds.
    pub fn begin_vector_db(
        &mut self,
        store: &mut ConversationStore,
        now: Instant,
    ) -> Option<PendingIngest> {
        if !self.can_generate_vector_db() {
            return None;
        }
        let conversation_id = self.resolve_conversation(store, false);
        let PanelKind::Rag(docs) = &mut self.kind else {
            return None;
        };
        docs.start_progress(now);
        self.status = PanelStatus::Busy(GENERATING_VECTOR_DB);

        info!(
            conversation_id = %conversation_id,
            file_count = docs.files().len(),
            "Generating vector database"
        );
        Some(PendingIngest {
            agent: self.agent,
            conversation_id,
            revision: docs.revision(),
            files: docs.upload_paths(),
        })
    }

    /// Record the outcome of a vector database generation and return to idle
    pub fn finish_vector_db(
        &mut self,
        store: &mut ConversationStore,
        conversation_id: &str,
        revision: u64,
        report: IngestReport,
    ) {
        if let Some(uploaded) = &report.uploaded {
            if let Err(e) =
                store.update_conversation_files(conversation_id, FileSummary::from(uploaded.as_slice()))
            {
                warn!(conversation_id = %conversation_id, error = %e, "File summary dropped");
            }
        }

        let result = report.result.map_err(|failure| {
            error!(
                conversation_id = %conversation_id,
                error = %failure,
                "Vector database generation failed"
            );
            failure.to_string()
        });
        if let PanelKind::Rag(docs) = &mut self.kind {
            docs.finish(revision, result);
        }
        self.status = PanelStatus::Idle;
    }

    /// Run the whole vector database generation against `api`
    ///
    /// Returns `false` if nothing was started.
    pub async fn generate_vector_db(
        &mut self,
        store: &mut ConversationStore,
        api: &dyn AgentApi,
    ) -> bool {
        let Some(pending) = self.begin_vector_db(store, Instant::now()) else {
            return false;
        };
        let report = ingest_paths(api, pending.agent, &pending.conversation_id, &pending.files).await;
        self.finish_vector_db(store, &pending.conversation_id, pending.revision, report);
        true
    }

    /// Current conversation if it belongs to this agent, else a new one
    fn resolve_conversation(
        &self,
        store: &mut ConversationStore,
        attach_documents: bool,
    ) -> ConversationId {
        if let Some(conversation) = store
            .current_conversation()
            .filter(|c| c.agent_type == self.agent)
        {
            return conversation.id.clone();
        }

        let id = store.add_conversation(self.agent);
        if let PanelKind::Rag(docs) = &self.kind {
            if attach_documents && docs.is_generated() && !docs.is_empty() {
                if let Err(e) = store.update_conversation_files(&id, docs.summary()) {
                    warn!(conversation_id = %id, error = %e, "File summary dropped");
                }
            }
        }
        id
    }
}
