use serde::{Deserialize, Serialize};

/// Head-to-head matchup as served by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub team_a: String,
    pub team_b: String,
    pub score_a: f64,
    pub score_b: f64,
}

impl Matchup {
    /// Display identity, `"<teamA>-vs-<teamB>"`. Not unique across matchups
    /// that share team names.
    pub fn id(&self) -> String {
        format!("{}-vs-{}", self.team_a, self.team_b)
    }
}
