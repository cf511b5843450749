//! Chat client for asking questions against pre-indexed document
//! collections.
//!
//! The [`state::Session`] holds the conversation, [`service::chat_service`]
//! moves it through document listing and query turns against a
//! [`api::DocumentBackend`], and [`markdown`] renders answers.

pub mod api;
pub mod config;
pub mod errors;
pub mod markdown;
pub mod models;
pub mod service;
pub mod state;
