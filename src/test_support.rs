//! In-process matchup endpoint for tests.

use crate::data::DataClient;
use axum::{http::StatusCode, routing::get, Router};
use reqwest::{Client, Url};
use tokio::net::TcpListener;

pub const HAWKS_EAGLES: &str = r#"{"teamA":"Hawks","teamB":"Eagles","scoreA":12.5,"scoreB":9.0}"#;

/// Serve `body` with `status` at `/matchup` on an ephemeral port.
pub async fn serve(status: StatusCode, body: &'static str) -> Url {
    let app = Router::new().route("/matchup", get(move || async move { (status, body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Url::parse(&format!("http://{addr}/matchup")).unwrap()
}

/// A URL on a port nothing listens on.
pub async fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/matchup")).unwrap()
}

pub fn client_for(url: Url) -> DataClient {
    let client = Client::builder().no_proxy().build().unwrap();
    DataClient::with_client(client, url)
}
