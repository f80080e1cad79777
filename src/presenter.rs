//! View state for the matchup screen and its mapping to a presentation.
//!
//! The presenter lives on the render loop. Fetch results arrive from a
//! worker task as [`FetchOutcome`]s and are applied between frames.

use crate::data::FetchError;
use crate::model::Matchup;
use tracing::debug;

pub const LOADING_LABEL: &str = "Loading matchup…";
pub const SEPARATOR: &str = "vs";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(Matchup),
    Failed(String),
}

/// Result of one fetch, tagged with the request that produced it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Matchup, FetchError>,
}

/// One side of the scoreboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub team: String,
    pub score: String,
}

/// Exactly one of these is drawn per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Loading { label: &'static str },
    Scoreboard {
        left: Column,
        right: Column,
        separator: &'static str,
    },
    Error { text: String },
}

#[derive(Debug)]
pub struct Presenter {
    state: ViewState,
    generation: u64,
}

impl Default for Presenter {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            generation: 0,
        }
    }
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Reset to `Loading` and start a new request generation. The returned
    /// generation must accompany the outcome of the fetch it triggers.
    pub fn load_matchup(&mut self) -> u64 {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.generation
    }

    /// Apply a fetch outcome. Outcomes from superseded requests are dropped.
    /// Returns whether the state changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding stale fetch outcome"
            );
            return false;
        }
        self.state = match outcome.result {
            Ok(matchup) => ViewState::Loaded(matchup),
            // Keep the whole cause chain; the top-level transport error alone
            // doesn't say whether the connection was refused or timed out.
            Err(err) => ViewState::Failed(format!("{:#}", anyhow::Error::from(err))),
        };
        true
    }

    pub fn presentation(&self) -> Presentation {
        match &self.state {
            ViewState::Loading => Presentation::Loading {
                label: LOADING_LABEL,
            },
            ViewState::Loaded(m) => Presentation::Scoreboard {
                left: Column {
                    team: m.team_a.clone(),
                    score: format_score(m.score_a),
                },
                right: Column {
                    team: m.team_b.clone(),
                    score: format_score(m.score_b),
                },
                separator: SEPARATOR,
            },
            ViewState::Failed(message) => Presentation::Error {
                text: format!("Failed to load: {message}"),
            },
        }
    }
}

pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}
