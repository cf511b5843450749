//! Conversation store: the single session object the UI renders from.

use crate::models::{Message, Sender};

pub const GREETING_ID: &str = "initial-ai-message";
pub const GREETING: &str = "Dobrý den! Jsem Váš AI asistent. Nejprve prosím vyberte dokumentaci \
                            ze seznamu nahoře, a pak se mě zeptejte na cokoli z této dokumentace.";

/// Confirmation appended when the user picks a document collection.
pub fn selection_notice(doc: &str) -> String {
    format!(
        "Vybrali jste dokumentaci: **{doc}**. \
         Nyní se mě můžete zeptat na cokoli z této dokumentace."
    )
}

/// Everything the chat page knows. Owned by one controller and mutated only
/// through the methods here and in [`crate::service::chat_service`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub messages: Vec<Message>,
    pub available_documents: Vec<String>,
    pub selected_document: Option<String>,
    pub is_query_in_flight: bool,
    pub is_document_list_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::with_id(GREETING_ID, Sender::Ai, GREETING)],
            available_documents: Vec::new(),
            selected_document: None,
            is_query_in_flight: false,
            is_document_list_loading: true,
        }
    }

    /// Adds `message` after every existing entry.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the text of the message with `id`. Returns `false` and leaves
    /// the session untouched when no such message exists.
    pub fn update_text(&mut self, id: &str, new_text: impl Into<String>) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.text = new_text.into();
                true
            }
            None => false,
        }
    }

    /// Selects a document collection. An empty name clears the selection
    /// without posting a confirmation.
    pub fn set_selected_document(&mut self, doc: impl Into<String>) {
        let doc = doc.into();
        if doc.is_empty() {
            self.selected_document = None;
            return;
        }
        self.append(Message::ai(selection_notice(&doc)));
        self.selected_document = Some(doc);
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True for the empty AI answer of the turn that is still waiting on the
    /// backend.
    pub fn is_pending_placeholder(&self, message: &Message) -> bool {
        self.is_query_in_flight && message.sender == Sender::Ai && message.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_seeded_with_greeting() {
        let session = Session::new();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].id, GREETING_ID);
        assert_eq!(session.messages[0].sender, Sender::Ai);
        assert!(session.is_document_list_loading);
        assert!(!session.is_query_in_flight);
        assert!(session.selected_document.is_none());
    }

    #[test]
    fn append_grows_by_one_and_keeps_order() {
        let mut session = Session::new();
        let texts = ["first", "second", "third", "fourth"];
        for (i, text) in texts.iter().enumerate() {
            let before = session.messages.len();
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            session.append(Message::new(sender, *text));
            assert_eq!(session.messages.len(), before + 1);
        }
        let tail: Vec<&str> = session.messages[1..].iter().map(|m| m.text.as_str()).collect();
        assert_eq!(tail, texts);
    }

    #[test]
    fn update_text_touches_only_the_matching_message() {
        let mut session = Session::new();
        session.append(Message::with_id("u1", Sender::User, "question"));
        session.append(Message::with_id("a1", Sender::Ai, ""));
        session.append(Message::with_id("u2", Sender::User, "another"));
        let before = session.messages.clone();

        assert!(session.update_text("a1", "answer"));

        for (old, new) in before.iter().zip(&session.messages) {
            if old.id == "a1" {
                assert_eq!(new.text, "answer");
                assert_eq!(new.sender, old.sender);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn update_text_with_unknown_id_is_a_no_op() {
        let mut session = Session::new();
        let before = session.clone();
        assert!(!session.update_text("missing", "text"));
        assert_eq!(session, before);
    }

    #[test]
    fn selecting_a_document_posts_confirmation() {
        let mut session = Session::new();
        session.set_selected_document("guide-A");
        assert_eq!(session.selected_document.as_deref(), Some("guide-A"));
        let last = session.last_message().unwrap();
        assert_eq!(last.sender, Sender::Ai);
        assert!(last.text.starts_with("Vybrali jste dokumentaci: **guide-A**."));
    }

    #[test]
    fn selecting_empty_clears_without_message() {
        let mut session = Session::new();
        session.set_selected_document("guide-A");
        let count = session.messages.len();
        session.set_selected_document("");
        assert!(session.selected_document.is_none());
        assert_eq!(session.messages.len(), count);
    }

    #[test]
    fn placeholder_is_pending_only_while_in_flight() {
        let mut session = Session::new();
        let placeholder = Message::ai("");
        assert!(!session.is_pending_placeholder(&placeholder));
        session.is_query_in_flight = true;
        assert!(session.is_pending_placeholder(&placeholder));
        assert!(!session.is_pending_placeholder(&Message::user("")));
        assert!(!session.is_pending_placeholder(&Message::ai("done")));
    }
}
