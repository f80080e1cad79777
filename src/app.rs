use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::data::DataClient;
use crate::presenter::{FetchOutcome, Presenter, ViewState};

/// Screen state owned by the render loop.
#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub presenter: Presenter,
    pub last_updated: Option<DateTime<Local>>,
    pub tick: usize,
    client: DataClient,
    tx: UnboundedSender<FetchOutcome>,
}

impl App {
    pub fn new(client: DataClient, tx: UnboundedSender<FetchOutcome>) -> Self {
        Self {
            should_quit: false,
            presenter: Presenter::new(),
            last_updated: None,
            tick: 0,
            client,
            tx,
        }
    }

    /// Reset the screen to loading and issue a fetch. The outcome comes back
    /// through the channel tagged with this request's generation.
    pub fn load_matchup(&mut self) {
        let generation = self.presenter.load_matchup();
        info!(generation, url = %self.client.endpoint(), "loading matchup");

        let tx = self.tx.clone();
        self.client.fetch(move |result| {
            // Receiver gone means the screen is shutting down.
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.load_matchup(),
            _ => {}
        }
    }

    pub fn on_outcome(&mut self, outcome: FetchOutcome) {
        if self.presenter.apply(outcome) && matches!(self.presenter.state(), ViewState::Loaded(_)) {
            self.last_updated = Some(Local::now());
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Presentation;
    use crate::test_support::{client_for, refused_url, serve, HAWKS_EAGLES};
    use axum::http::StatusCode;
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    async fn next_outcome(rx: &mut UnboundedReceiver<FetchOutcome>) -> FetchOutcome {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no fetch outcome")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_appear_loads_matchup() {
        let url = serve(StatusCode::OK, HAWKS_EAGLES).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(client_for(url), tx);

        app.load_matchup();
        assert_eq!(app.presenter.state(), &ViewState::Loading);

        let outcome = next_outcome(&mut rx).await;
        assert_eq!(outcome.generation, 1);
        app.on_outcome(outcome);

        match app.presenter.presentation() {
            Presentation::Scoreboard { left, right, separator } => {
                assert_eq!((left.team.as_str(), left.score.as_str()), ("Hawks", "12.50"));
                assert_eq!((right.team.as_str(), right.score.as_str()), ("Eagles", "9.00"));
                assert_eq!(separator, "vs");
            }
            other => panic!("expected scoreboard, got {other:?}"),
        }
        assert!(app.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_transport_failure_shows_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(client_for(refused_url().await), tx);

        app.load_matchup();
        let outcome = next_outcome(&mut rx).await;
        app.on_outcome(outcome);

        match app.presenter.presentation() {
            Presentation::Error { text } => {
                let description = text.trim_start_matches("Failed to load: ");
                assert!(description.starts_with("network request failed: "), "{text}");
                assert!(description.to_lowercase().contains("refused"), "{text}");
            }
            other => panic!("expected error view, got {other:?}"),
        }
        assert!(app.last_updated.is_none());
    }

    #[tokio::test]
    async fn test_refresh_supersedes_earlier_request() {
        let url = serve(StatusCode::OK, HAWKS_EAGLES).await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(client_for(url), tx);

        app.load_matchup();
        app.on_key(KeyCode::Char('r'));
        assert_eq!(app.presenter.state(), &ViewState::Loading);

        let mut outcomes = vec![next_outcome(&mut rx).await, next_outcome(&mut rx).await];
        outcomes.sort_by_key(|o| o.generation);
        assert_eq!(
            outcomes.iter().map(|o| o.generation).collect::<Vec<_>>(),
            vec![1, 2]
        );
        let current = outcomes.pop().unwrap();
        let stale = outcomes.pop().unwrap();

        app.on_outcome(current);
        assert!(matches!(app.presenter.state(), ViewState::Loaded(_)));

        app.on_key(KeyCode::Char('r'));
        app.on_outcome(stale);
        assert_eq!(app.presenter.state(), &ViewState::Loading);
    }

    #[test]
    fn test_quit_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let url = reqwest::Url::parse("http://127.0.0.1:1/matchup").unwrap();

        let mut app = App::new(DataClient::new(url.clone()), tx.clone());
        app.on_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::new(DataClient::new(url), tx);
        app.on_key(KeyCode::Esc);
        assert!(app.should_quit);
    }
}
