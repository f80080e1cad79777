use crate::model::Matchup;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single fetch attempt failed. None of these are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network request failed")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("no data in response")]
    NoData,

    #[error("could not decode matchup")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct DataClient {
    client: Client,
    endpoint: Url,
}

impl DataClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue one GET against the endpoint and decode the body.
    pub async fn fetch_matchup(&self) -> Result<Matchup, FetchError> {
        info!(url = %self.endpoint, "fetching matchup");
        let resp = self.client.get(self.endpoint.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "matchup endpoint returned non-success status");
            return Err(FetchError::Status(status));
        }

        let body = resp.bytes().await?;
        if body.is_empty() {
            warn!("matchup response had an empty body");
            return Err(FetchError::NoData);
        }
        debug!(bytes = body.len(), "matchup body received");

        let matchup = serde_json::from_slice::<Matchup>(&body)?;
        info!(id = %matchup.id(), "matchup decoded");
        Ok(matchup)
    }

    /// Run [`fetch_matchup`](Self::fetch_matchup) on a spawned task and hand
    /// the result to `on_complete` exactly once, on that task.
    pub fn fetch<F>(&self, on_complete: F)
    where
        F: FnOnce(Result<Matchup, FetchError>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.fetch_matchup().await;
            if let Err(err) = &result {
                warn!(error = ?err, "matchup fetch failed");
            }
            on_complete(result);
        });
    }
}
