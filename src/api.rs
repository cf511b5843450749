use std::future::Future;

use crate::errors::AppError;
use crate::models::{QueryRequest, QueryResponse};

/// The two calls the chat makes against the document backend.
///
/// Implemented natively by [`HttpBackend`] and in the browser by the
/// frontend's `gloo-net` client. Futures are not required to be `Send`; the
/// chat runs on a single event loop.
pub trait DocumentBackend {
    /// `GET /get_tables`: names of the collections that can be queried.
    fn list_documents(&self) -> impl Future<Output = Result<Vec<String>, AppError>>;

    /// `POST /query`: asks `request.prompt` against `request.doc_name`.
    fn query(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryResponse, AppError>>;
}

pub fn tables_url(base_url: &str) -> String {
    format!("{base_url}/get_tables")
}

pub fn query_url(base_url: &str) -> String {
    format!("{base_url}/query")
}

#[cfg(feature = "http-client")]
pub use http::HttpBackend;

#[cfg(feature = "http-client")]
mod http {
    use tracing::{debug, error};

    use super::{query_url, tables_url, DocumentBackend};
    use crate::config::ClientConfig;
    use crate::errors::AppError;
    use crate::models::{QueryRequest, QueryResponse, TablesResponse};

    /// [`DocumentBackend`] over HTTP via `reqwest`.
    #[derive(Clone)]
    pub struct HttpBackend {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpBackend {
        pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = config.request_timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {e}")))?;
            Ok(Self { client, base_url: config.api_base_url.clone() })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(AppError::status(status.as_u16(), status.canonical_reason().unwrap_or_default()))
        }
    }

    impl DocumentBackend for HttpBackend {
        async fn list_documents(&self) -> Result<Vec<String>, AppError> {
            let url = tables_url(&self.base_url);
            debug!("Fetching document list from {url}");

            let resp = self.client.get(&url).send().await.map_err(|e| {
                error!("Document list request to {url} failed: {e}");
                AppError::from(e)
            })?;
            let resp = ensure_success(resp).inspect_err(|e| {
                error!("Document list request to {url} failed: {e}");
            })?;

            let body: TablesResponse = resp.json().await.map_err(|e| {
                error!("Failed to decode document list: {e}");
                AppError::Decode(e.to_string())
            })?;
            Ok(body.tables)
        }

        async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AppError> {
            let url = query_url(&self.base_url);
            debug!("Querying {} at {url}", request.doc_name);

            let resp = self.client.post(&url).json(request).send().await.map_err(|e| {
                error!("Query against {} failed: {e}", request.doc_name);
                AppError::from(e)
            })?;
            let resp = ensure_success(resp).inspect_err(|e| {
                error!("Query against {} failed: {e}", request.doc_name);
            })?;

            resp.json::<QueryResponse>().await.map_err(|e| {
                error!("Failed to decode query response: {e}");
                AppError::Decode(e.to_string())
            })
        }
    }
}
