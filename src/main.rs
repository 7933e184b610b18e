// Agent Chat GUI - Main Entry Point
// Native Rust GUI for chatting with the global, RAG and web search agents

mod state;
mod ui;

use agent_chat_client::store::StoreFile;
use agent_chat_client::{
    AgentType, ClientConfig, ConversationStore, Dispatcher, HttpAgentApi, Workbench,
};
use anyhow::Context;
use eframe::egui;
use state::{AppState, Outbound, UiAction};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::render_app_layout;

/// Repaint rate while a request is in flight (spinners, progress stages)
const BUSY_REPAINT: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        data_dir = %config.data_dir.display(),
        "Starting Agent Chat"
    );

    let store_path = config.store_path();
    let store = StoreFile::load_or_seed(&store_path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %store_path.display(),
            error = %e,
            "Could not load conversations, starting from examples"
        );
        ConversationStore::with_examples()
    });

    let api = HttpAgentApi::from_config(&config).context("Failed to build HTTP client")?;
    let dispatcher =
        Dispatcher::new(Arc::new(api)).context("Failed to start request runtime")?;
    let workbench = Workbench::new(store, config.progress_interval());

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agent Chat")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Agent Chat",
        options,
        Box::new(move |cc| {
            let mut dispatcher = dispatcher;
            let repaint_ctx = cc.egui_ctx.clone();
            dispatcher.set_notifier(Arc::new(move || repaint_ctx.request_repaint()));
            Box::new(AgentChatApp::new(
                AppState::new(workbench, store_path),
                dispatcher,
            ))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

/// Main application struct
/// Owns application state and the background request dispatcher
struct AgentChatApp {
    /// Workbench and UI preferences
    state: AppState,
    /// Runs agent API calls off the UI thread
    dispatcher: Dispatcher,
}

impl AgentChatApp {
    /// Create a new application instance
    fn new(state: AppState, dispatcher: Dispatcher) -> Self {
        Self { state, dispatcher }
    }

    /// Apply the frame's actions and hand requests to the dispatcher
    fn handle_actions(&mut self, actions: Vec<UiAction>) {
        let now = Instant::now();
        for action in actions {
            match self.state.apply(action, now) {
                Some(Outbound::Chat(pending)) => self.dispatcher.dispatch_chat(pending),
                Some(Outbound::Ingest(pending)) => self.dispatcher.dispatch_ingest(pending),
                None => {}
            }
        }
    }
}

impl eframe::App for AgentChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(event) = self.dispatcher.try_next() {
            self.state.apply_event(event);
        }

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() && self.state.workbench.active_tab() == AgentType::Rag {
            self.handle_actions(dropped.into_iter().map(UiAction::AddDocument).collect());
        }

        // Render the main application layout
        let actions = render_app_layout(ctx, &mut self.state);
        self.handle_actions(actions);
        self.state.autosave();

        if self.state.workbench.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
