use gloo_net::http::{Request, Response};

use doc_chat::api::{query_url, tables_url, DocumentBackend};
use doc_chat::config::DEFAULT_API_BASE_URL;
use doc_chat::errors::AppError;
use doc_chat::models::{QueryRequest, QueryResponse, TablesResponse};

/// Base URL of the document backend, fixed at build time.
const API_BASE: &str = match option_env!("DOC_CHAT_API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// [`DocumentBackend`] over the browser's `fetch`.
#[derive(Clone, Copy, Default)]
pub struct GlooBackend;

fn ensure_ok(resp: Response) -> Result<Response, AppError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(AppError::status(resp.status(), &resp.status_text()))
    }
}

impl DocumentBackend for GlooBackend {
    async fn list_documents(&self) -> Result<Vec<String>, AppError> {
        let resp = Request::get(&tables_url(API_BASE))
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        ensure_ok(resp)?
            .json::<TablesResponse>()
            .await
            .map(|body| body.tables)
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AppError> {
        let resp = Request::post(&query_url(API_BASE))
            .json(request)
            .map_err(|e| AppError::Transport(format!("Serialize error: {e}")))?
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        ensure_ok(resp)?
            .json::<QueryResponse>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}
