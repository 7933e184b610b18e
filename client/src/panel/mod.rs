//! Agent panels
//!
//! One [`AgentPanel`] per agent tab. Panels never perform I/O themselves:
//! `begin_*` records local state and returns the request to send, `finish_*`
//! applies the outcome. The async `submit`/`generate_vector_db` helpers run
//! both halves against an [`crate::api::AgentApi`] in one go.

pub mod agent_panel;
pub mod documents;
pub mod schema;

pub use agent_panel::{
    busy_label, AgentPanel, PanelKind, PanelMode, PanelStatus, PendingChat, PendingIngest,
    FALLBACK_REPLY,
};
pub use documents::{DocumentSet, IngestProgress, SelectedFile, ALLOWED_EXTENSIONS};
pub use schema::{extract_schema_marker, SearchSchema, NO_SCHEMA_HINT, SUGGESTED_SCHEMA};
