// Request dispatcher
// Runs agent API calls on a tokio runtime and hands results back to the UI thread

use crate::api::ingest::{ingest_paths, IngestReport};
use crate::api::{AgentApi, ChatResponse};
use crate::error::ApiError;
use crate::panel::{PendingChat, PendingIngest};
use crate::store::{AgentType, ConversationId};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Callback invoked after an event is queued (e.g. to request a repaint)
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Completed request, to be applied on the thread that owns the store
#[derive(Debug)]
pub enum ApiEvent {
    /// A chat request finished
    ChatFinished {
        /// Agent the request went to
        agent: AgentType,
        /// Conversation the reply belongs to
        conversation_id: ConversationId,
        /// Backend answer or transport failure
        outcome: Result<ChatResponse, ApiError>,
    },
    /// A vector database generation finished
    IngestFinished {
        /// Agent the request went to
        agent: AgentType,
        /// Conversation the documents belong to
        conversation_id: ConversationId,
        /// Document selection revision the run was started for
        revision: u64,
        /// Upload and build outcome
        report: IngestReport,
    },
}

/// Spawns agent API calls and collects their results
///
/// The UI thread calls `dispatch_*` with the pending request returned by a
/// panel and drains [`ApiEvent`]s with [`Dispatcher::try_next`] once per
/// frame.
pub struct Dispatcher {
    runtime: Runtime,
    api: Arc<dyn AgentApi>,
    sender: Sender<ApiEvent>,
    receiver: Receiver<ApiEvent>,
    notifier: Option<Notifier>,
}

impl Dispatcher {
    /// Create a dispatcher with its own multi-threaded runtime
    pub fn new(api: Arc<dyn AgentApi>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("agent-api")
            .enable_all()
            .build()?;
        let (sender, receiver) = channel();
        Ok(Self {
            runtime,
            api,
            sender,
            receiver,
            notifier: None,
        })
    }

    /// Call `notifier` every time an event is queued
    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    /// Send a chat request in the background
    pub fn dispatch_chat(&self, pending: PendingChat) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        let notifier = self.notifier.clone();

        debug!(conversation_id = %pending.conversation_id, agent = %pending.agent, "Dispatching chat");
        self.runtime.spawn(async move {
            let outcome = api.chat(pending.agent, &pending.request).await;
            deliver(
                &sender,
                notifier.as_ref(),
                ApiEvent::ChatFinished {
                    agent: pending.agent,
                    conversation_id: pending.conversation_id,
                    outcome,
                },
            );
        });
    }

    /// Upload documents and build a vector database in the background
    pub fn dispatch_ingest(&self, pending: PendingIngest) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        let notifier = self.notifier.clone();

        debug!(
            conversation_id = %pending.conversation_id,
            file_count = pending.files.len(),
            "Dispatching vector database generation"
        );
        self.runtime.spawn(async move {
            let report = ingest_paths(
                api.as_ref(),
                pending.agent,
                &pending.conversation_id,
                &pending.files,
            )
            .await;
            deliver(
                &sender,
                notifier.as_ref(),
                ApiEvent::IngestFinished {
                    agent: pending.agent,
                    conversation_id: pending.conversation_id,
                    revision: pending.revision,
                    report,
                },
            );
        });
    }

    /// Next finished request, if any
    pub fn try_next(&self) -> Option<ApiEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until a request finishes or `timeout` elapses
    pub fn wait_next(&self, timeout: Duration) -> Option<ApiEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn deliver(sender: &Sender<ApiEvent>, notifier: Option<&Notifier>, event: ApiEvent) {
    if sender.send(event).is_err() {
        warn!("Dispatcher dropped before the request finished");
        return;
    }
    if let Some(notify) = notifier {
        notify();
    }
}
