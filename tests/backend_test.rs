mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use doc_chat::errors::CONNECTION_FALLBACK;
use doc_chat::models::Sender;
use doc_chat::service::chat_service::{
    QueryStart, DOCUMENT_LIST_FAILED, EMPTY_RESPONSE_FALLBACK, NO_DOCUMENT_SELECTED,
};
use doc_chat::state::Session;
use helpers::{service_for, spawn_backend, unreachable_address, Reply};

fn ready_session(doc: &str) -> Session {
    let mut session = Session::new();
    session.available_documents = vec![doc.to_string()];
    session.is_document_list_loading = false;
    session.set_selected_document(doc);
    session
}

#[tokio::test]
async fn startup_lists_available_documents() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A", "guide-B"] })),
        Reply::status(StatusCode::NOT_FOUND),
    )
    .await;
    let mut session = Session::new();

    backend.service().load_documents(&mut session).await;

    assert_eq!(session.available_documents, vec!["guide-A", "guide-B"]);
    assert!(!session.is_document_list_loading);
    assert_eq!(session.messages.len(), 1, "no error message expected");
}

#[tokio::test]
async fn startup_with_unreachable_backend_posts_error() {
    let service = service_for(&unreachable_address().await);
    let mut session = Session::new();

    service.load_documents(&mut session).await;

    assert!(session.available_documents.is_empty());
    assert!(!session.is_document_list_loading);
    assert_eq!(session.messages.len(), 2);
    let last = session.last_message().unwrap();
    assert_eq!(last.sender, Sender::Ai);
    assert_eq!(last.text, DOCUMENT_LIST_FAILED);
}

#[tokio::test]
async fn startup_with_server_error_posts_error() {
    let backend = spawn_backend(
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
        Reply::status(StatusCode::NOT_FOUND),
    )
    .await;
    let mut session = Session::new();

    backend.service().load_documents(&mut session).await;

    assert!(session.available_documents.is_empty());
    assert_eq!(session.last_message().unwrap().text, DOCUMENT_LIST_FAILED);
}

#[tokio::test]
async fn startup_with_array_body_yields_empty_list() {
    let backend =
        spawn_backend(Reply::json(json!([["guide-A"]])), Reply::status(StatusCode::NOT_FOUND))
            .await;
    let mut session = Session::new();

    backend.service().load_documents(&mut session).await;

    assert!(session.available_documents.is_empty());
    assert!(!session.is_document_list_loading);
    assert_eq!(session.messages.len(), 1);
}

#[tokio::test]
async fn startup_without_tables_field_yields_empty_list() {
    let backend =
        spawn_backend(Reply::json(json!({ "status": "ok" })), Reply::status(StatusCode::NOT_FOUND))
            .await;
    let mut session = Session::new();

    backend.service().load_documents(&mut session).await;

    assert!(session.available_documents.is_empty());
    assert!(!session.is_document_list_loading);
    assert_eq!(session.messages.len(), 1);
}

#[tokio::test]
async fn startup_with_non_json_body_posts_error() {
    let backend =
        spawn_backend(Reply::raw("<html>oops</html>"), Reply::status(StatusCode::NOT_FOUND)).await;
    let mut session = Session::new();

    backend.service().load_documents(&mut session).await;

    assert_eq!(session.last_message().unwrap().text, DOCUMENT_LIST_FAILED);
}

#[tokio::test]
async fn query_answer_fills_placeholder() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A"] })),
        Reply::json(json!({ "response": "X is ..." })),
    )
    .await;
    let mut session = ready_session("guide-A");

    let start = backend.service().send_message(&mut session, "What is X?").await;

    assert!(matches!(start, QueryStart::Sent(_)));
    assert_eq!(backend.queries(), vec![json!({ "prompt": "What is X?", "doc_name": "guide-A" })]);

    let n = session.messages.len();
    let (user, ai) = (&session.messages[n - 2], &session.messages[n - 1]);
    assert_eq!((user.sender, user.text.as_str()), (Sender::User, "What is X?"));
    assert_eq!((ai.sender, ai.text.as_str()), (Sender::Ai, "X is ..."));
    assert!(!session.is_query_in_flight);
}

#[tokio::test]
async fn query_server_error_is_shown_in_chat() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A"] })),
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .await;
    let mut session = ready_session("guide-A");

    backend.service().send_message(&mut session, "What is X?").await;

    let last = session.last_message().unwrap();
    assert_eq!(last.sender, Sender::Ai);
    assert!(last.text.starts_with("Chyba: "), "got {:?}", last.text);
    assert_eq!(last.text, "Chyba: API error: 500 Internal Server Error");
    assert!(!session.is_query_in_flight);
}

#[tokio::test]
async fn query_without_response_field_uses_fallback() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A"] })),
        Reply::json(json!({ "answer": "wrong field" })),
    )
    .await;
    let mut session = ready_session("guide-A");

    backend.service().send_message(&mut session, "What is X?").await;

    assert_eq!(session.last_message().unwrap().text, EMPTY_RESPONSE_FALLBACK);
}

#[tokio::test]
async fn query_against_unreachable_backend_reports_transport_error() {
    let service = service_for(&unreachable_address().await);
    let mut session = ready_session("guide-A");

    service.send_message(&mut session, "What is X?").await;

    let text = &session.last_message().unwrap().text;
    assert!(text.starts_with("Chyba: "));
    assert!(text.len() > "Chyba: ".len());
    assert_ne!(text, &format!("Chyba: {CONNECTION_FALLBACK}"));
    assert!(!session.is_query_in_flight);
}

#[tokio::test]
async fn query_without_selection_sends_nothing() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A"] })),
        Reply::json(json!({ "response": "unused" })),
    )
    .await;
    let service = backend.service();
    let mut session = Session::new();
    service.load_documents(&mut session).await;
    let before = session.messages.len();

    let start = service.send_message(&mut session, "What is X?").await;

    assert_eq!(start, QueryStart::NoDocument);
    assert!(backend.queries().is_empty());
    assert_eq!(session.messages.len(), before + 1);
    assert_eq!(session.last_message().unwrap().text, NO_DOCUMENT_SELECTED);
}

#[tokio::test]
async fn consecutive_turns_keep_order() {
    let backend = spawn_backend(
        Reply::json(json!({ "tables": ["guide-A"] })),
        Reply::json(json!({ "response": "**answer**" })),
    )
    .await;
    let service = backend.service();
    let mut session = ready_session("guide-A");
    let base = session.messages.len();

    service.send_message(&mut session, "first").await;
    service.send_message(&mut session, "second").await;

    let tail: Vec<(Sender, &str)> =
        session.messages[base..].iter().map(|m| (m.sender, m.text.as_str())).collect();
    assert_eq!(
        tail,
        vec![
            (Sender::User, "first"),
            (Sender::Ai, "**answer**"),
            (Sender::User, "second"),
            (Sender::Ai, "**answer**"),
        ]
    );
    assert_eq!(backend.queries().len(), 2);
}
