//! End-to-end agent workflows against a mocked agent backend

use agent_chat_client::panel::{AgentPanel, PanelMode, FALLBACK_REPLY, NO_SCHEMA_HINT};
use agent_chat_client::store::StoreFile;
use agent_chat_client::{AgentType, ConversationStore, HttpAgentApi, Message, Workbench};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn api_for(server: &Server) -> HttpAgentApi {
    HttpAgentApi::with_base_url(reqwest::Client::new(), &format!("{}/api", server.url()))
}

fn panel(agent: AgentType) -> AgentPanel {
    AgentPanel::new(agent, Duration::from_millis(10))
}

#[tokio::test]
async fn test_global_chat_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/global/chat")
        .match_body(Matcher::PartialJson(json!({ "message": "Hello" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","response":"Hi"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let mut store = ConversationStore::new();
    let mut global = panel(AgentType::Global);
    global.input = "Hello".to_string();

    assert!(global.submit(&mut store, &api).await);
    mock.assert_async().await;

    let conversation = store.current_conversation().unwrap();
    assert_eq!(conversation.title, "Hello");
    assert_eq!(
        conversation.messages,
        vec![Message::user("Hello"), Message::assistant("Hi")]
    );
    assert_eq!(global.mode(), PanelMode::Chat);
    assert!(!global.is_busy());
}

#[tokio::test]
async fn test_global_chat_server_error_falls_back() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/global/chat")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let api = api_for(&server);
    let mut store = ConversationStore::new();
    let mut global = panel(AgentType::Global);
    global.input = "A rather long question about the state of the world".to_string();

    global.submit(&mut store, &api).await;

    let conversation = store.current_conversation().unwrap();
    assert_eq!(conversation.title, "A rather long question about t...");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1], Message::assistant(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_chat_unreachable_backend_falls_back() {
    // Nothing listens on port 9 on a test machine
    let api = HttpAgentApi::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9/api");
    let mut store = ConversationStore::new();
    let mut rag = panel(AgentType::Rag);
    rag.input = "anyone there?".to_string();

    rag.submit(&mut store, &api).await;

    let messages = &store.current_conversation().unwrap().messages;
    assert_eq!(messages[1], Message::assistant(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_rag_generate_then_chat() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/api/rag/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "files": [
                    { "name": "a.txt", "path": "uploaded_files/a.txt", "size": 3 },
                    { "name": "b.csv", "path": "uploaded_files/b.csv", "size": 5 }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let build = server
        .mock("POST", "/api/rag/generate-vector-db")
        .match_body(Matcher::PartialJson(json!({
            "file_paths": [
                { "name": "a.txt", "path": "uploaded_files/a.txt", "size": 3 },
                { "name": "b.csv", "path": "uploaded_files/b.csv", "size": 5 }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","message":"Vector database created"}"#)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/api/rag/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","response":"Both files mention cats."}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, "abc").unwrap();
    std::fs::write(&b, "x,y,z").unwrap();

    let api = api_for(&server);
    let mut store = ConversationStore::new();
    let mut rag = panel(AgentType::Rag);
    rag.add_document(&a).unwrap();
    rag.add_document(&b).unwrap();

    assert!(rag.generate_vector_db(&mut store, &api).await);
    upload.assert_async().await;
    build.assert_async().await;

    let docs = rag.documents().unwrap();
    assert!(docs.is_generated());
    assert!(docs.last_error().is_none());
    assert!(!rag.can_generate_vector_db());

    let conversation_id = store.current_conversation_id().unwrap().to_string();
    let files = store.get(&conversation_id).unwrap().files.clone().unwrap();
    assert_eq!(files.count, 2);
    assert_eq!(files.total_size, 8);

    rag.input = "What do they have in common?".to_string();
    rag.submit(&mut store, &api).await;
    chat.assert_async().await;
    assert_eq!(store.current_conversation_id(), Some(conversation_id.as_str()));

    // Changing the selection re-enables generation
    rag.remove_document(1).unwrap();
    assert!(!rag.documents().unwrap().is_generated());
    assert!(rag.can_generate_vector_db());
}

#[tokio::test]
async fn test_rag_upload_rejected() {
    let mut server = Server::new_async().await;
    let _upload = server
        .mock("POST", "/api/rag/upload")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","message":"quota exceeded"}"#)
        .create_async()
        .await;
    let build = server
        .mock("POST", "/api/rag/generate-vector-db")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, "%PDF-1.4").unwrap();

    let api = api_for(&server);
    let mut store = ConversationStore::new();
    let mut rag = panel(AgentType::Rag);
    rag.add_document(&path).unwrap();

    rag.generate_vector_db(&mut store, &api).await;
    build.assert_async().await;

    let docs = rag.documents().unwrap();
    assert!(!docs.is_generated());
    assert_eq!(docs.last_error(), Some("Upload failed: quota exceeded"));
    assert!(!rag.is_busy());
    assert!(rag.can_generate_vector_db());
}

#[tokio::test]
async fn test_websearch_schema_flow() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/api/websearch/chat")
        .match_body(Matcher::PartialJson(json!({
            "message": "Acme Corp",
            "schema": NO_SCHEMA_HINT
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","response":"Acme makes anvils."}"#)
        .create_async()
        .await;
    let follow_up = server
        .mock("POST", "/api/websearch/chat")
        .match_body(Matcher::PartialJson(json!({
            "message": "Who is the CEO?",
            "schema": "{\"ceo\": \"name\"}"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"error","response":"rate limited"}"#)
        .create_async()
        .await;

    let api = api_for(&server);
    let mut store = ConversationStore::new();
    let mut web = panel(AgentType::WebSearch);

    web.input = "Acme Corp".to_string();
    web.submit(&mut store, &api).await;
    first.assert_async().await;

    web.input = "Who is the CEO? [SCHEMA] {\"ceo\": \"name\"}".to_string();
    web.submit(&mut store, &api).await;
    follow_up.assert_async().await;

    let messages = &store.current_conversation().unwrap().messages;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2], Message::user("Who is the CEO?"));
    assert_eq!(messages[3], Message::assistant("Error: rate limited"));
}

#[test]
fn test_workbench_tab_switch_and_history() {
    let mut workbench = Workbench::new(ConversationStore::with_examples(), Duration::from_millis(10));

    assert!(workbench.open_conversation("conv-2"));
    assert_eq!(workbench.active_tab(), AgentType::Rag);
    assert_eq!(workbench.panel(AgentType::Rag).mode(), PanelMode::Chat);
    assert!(workbench.panel(AgentType::Rag).documents().unwrap().is_generated());

    workbench.select_tab(AgentType::Global);
    assert!(workbench.store().current_conversation().is_none());
    assert_eq!(workbench.panel(AgentType::Global).mode(), PanelMode::Input);

    let history = workbench.history(chrono::Utc::now().timestamp_millis());
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|entry| !entry.is_current));
}

#[test]
fn test_workbench_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("conversations.json");

    let store = StoreFile::load_or_seed(&path).unwrap();
    let mut workbench = Workbench::new(store, Duration::from_millis(10));
    workbench.select_tab(AgentType::WebSearch);
    workbench.panel_mut(AgentType::WebSearch).input = "rust release notes".to_string();
    let pending = workbench.begin_submit(AgentType::WebSearch).unwrap();
    workbench.save(&path).unwrap();

    let reloaded = StoreFile::load_or_seed(&path).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(
        reloaded.current_conversation_id(),
        Some(pending.conversation_id.as_str())
    );
    let conversation = reloaded.get(&pending.conversation_id).unwrap();
    assert_eq!(conversation.title, "rust release notes");
    assert_eq!(conversation.messages, vec![Message::user("rust release notes")]);

    // A fresh workbench reopens the saved conversation on its own tab
    let revision = reloaded.revision();
    let restarted = Workbench::new(reloaded, Duration::from_millis(10));
    assert_eq!(
        restarted.store().current_conversation_id(),
        Some(pending.conversation_id.as_str())
    );
    assert_eq!(restarted.store().revision(), revision);
    assert_eq!(restarted.active_tab(), AgentType::WebSearch);
    assert_eq!(restarted.panel(AgentType::WebSearch).mode(), PanelMode::Chat);

    // Saving again keeps the pointer
    restarted.save(&path).unwrap();
    let again = StoreFile::load_or_seed(&path).unwrap();
    assert_eq!(
        again.current_conversation_id(),
        Some(pending.conversation_id.as_str())
    );
}
