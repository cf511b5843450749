use tracing::{error, info, warn};

use crate::api::DocumentBackend;
use crate::errors::AppError;
use crate::models::{Message, QueryRequest, QueryResponse};
use crate::state::Session;

pub const DOCUMENT_LIST_FAILED: &str =
    "Nepodařilo se načíst seznam dostupných dokumentací. Zkontrolujte prosím, zda server běží.";
pub const NO_DOCUMENT_SELECTED: &str = "Prosím nejprve vyberte dokumentaci ze seznamu nahoře.";
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "Omlouvám se, došlo k chybě při zpracování vaší odpovědi.";

/// A query turn that has been recorded in the session and is waiting on the
/// backend. Hand it back to [`finish_query`] exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub placeholder_id: String,
    pub request: QueryRequest,
}

/// What [`start_query`] did with the submitted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStart {
    /// Blank input or a query already in flight; nothing changed.
    Ignored,
    /// No collection selected; an error message was posted.
    NoDocument,
    /// User message and placeholder were appended; send the request.
    Sent(PendingQuery),
}

/// Applies the outcome of the startup document listing.
pub fn finish_document_load(session: &mut Session, outcome: Result<Vec<String>, AppError>) {
    match outcome {
        Ok(documents) => {
            info!("Loaded {} document collection(s)", documents.len());
            session.available_documents = documents;
        }
        Err(e) => {
            error!("Failed to fetch available documents: {e}");
            session.available_documents.clear();
            session.append(Message::ai(DOCUMENT_LIST_FAILED));
        }
    }
    session.is_document_list_loading = false;
}

/// Records the user's turn and the empty answer placeholder, in that order.
pub fn start_query(session: &mut Session, input: &str) -> QueryStart {
    if session.is_query_in_flight || input.trim().is_empty() {
        return QueryStart::Ignored;
    }

    let Some(doc_name) = session.selected_document.clone() else {
        warn!("Query submitted without a selected document");
        session.append(Message::ai(NO_DOCUMENT_SELECTED));
        return QueryStart::NoDocument;
    };

    session.append(Message::user(input));
    session.is_query_in_flight = true;

    let placeholder = Message::ai("");
    let placeholder_id = placeholder.id.clone();
    session.append(placeholder);

    QueryStart::Sent(PendingQuery {
        placeholder_id,
        request: QueryRequest { prompt: input.to_string(), doc_name },
    })
}

/// Fills the placeholder of `pending` and ends the turn.
pub fn finish_query(
    session: &mut Session,
    pending: PendingQuery,
    outcome: Result<QueryResponse, AppError>,
) {
    let text = match outcome {
        Ok(body) => body.response.unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string()),
        Err(e) => {
            error!("Query against {} failed: {e}", pending.request.doc_name);
            format!("Chyba: {}", e.user_message())
        }
    };

    if !session.update_text(&pending.placeholder_id, text) {
        warn!("Placeholder {} vanished before its answer arrived", pending.placeholder_id);
    }
    session.is_query_in_flight = false;
}

/// Drives the session against a backend, awaiting each call in turn.
pub struct ChatService<B> {
    backend: B,
}

impl<B: DocumentBackend> ChatService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Startup sequence: list collections and clear the loading flag.
    pub async fn load_documents(&self, session: &mut Session) {
        let outcome = self.backend.list_documents().await;
        finish_document_load(session, outcome);
    }

    /// One query turn. Returns what [`start_query`] decided.
    pub async fn send_message(&self, session: &mut Session, input: &str) -> QueryStart {
        let start = start_query(session, input);
        if let QueryStart::Sent(pending) = &start {
            let outcome = self.backend.query(&pending.request).await;
            finish_query(session, pending.clone(), outcome);
        }
        start
    }
}
