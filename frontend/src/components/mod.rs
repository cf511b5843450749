pub mod chat;
pub mod document_selector;
