use leptos::prelude::*;
use leptos::task::spawn_local;

use doc_chat::api::DocumentBackend;
use doc_chat::service::chat_service::{self, QueryStart};
use doc_chat::state::Session;

use crate::api::GlooBackend;

/// Shared application state, provided via Leptos context.
///
/// The whole conversation lives in one [`Session`] signal; every mutation
/// goes through the `doc_chat` store and orchestrator functions.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: RwSignal<Session>,
    backend: GlooBackend,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let state = Self { session: RwSignal::new(Session::new()), backend: GlooBackend };
        provide_context(state);
        state
    }

    /// Startup: fetch the available document collections once.
    pub fn load_documents(&self) {
        let session = self.session;
        let backend = self.backend;
        spawn_local(async move {
            let outcome = backend.list_documents().await;
            session.update(|s| chat_service::finish_document_load(s, outcome));
        });
    }

    pub fn select_document(&self, doc: String) {
        self.session.update(|s| s.set_selected_document(doc));
    }

    /// Submits `text` as a question. Ignored while a query is in flight or
    /// when `text` is blank.
    pub fn send_message(&self, text: String) {
        let ignored = self
            .session
            .with_untracked(|s| s.is_query_in_flight || text.trim().is_empty());
        if ignored {
            return;
        }

        let Some(QueryStart::Sent(pending)) =
            self.session.try_update(|s| chat_service::start_query(s, &text))
        else {
            return;
        };

        let session = self.session;
        let backend = self.backend;
        spawn_local(async move {
            let outcome = backend.query(&pending.request).await;
            session.update(|s| chat_service::finish_query(s, pending, outcome));
        });
    }
}
