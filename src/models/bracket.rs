//! Knockout bracket: matches, rounds, and bracket state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stand-in opponent for the odd participant out in a round.
pub const BYE: &str = "BYE";

/// Unique identifier for a knockout match, built from the participant names.
pub type KnockoutMatchId = String;

/// One elimination tier, generated all at once.
pub type Round = Vec<KnockoutMatch>;

/// A single-elimination match. `team_b` is [`BYE`] when `team_a` advances without playing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutMatch {
    pub id: KnockoutMatchId,
    pub team_a: String,
    pub team_b: String,
    /// None until decided. Bye matches start decided.
    #[serde(default, with = "winner_text")]
    pub winner: Option<String>,
}

impl KnockoutMatch {
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        let team_a = team_a.into();
        let team_b = team_b.into();
        Self {
            id: format!("{}-{}", team_a, team_b),
            team_a,
            team_b,
            winner: None,
        }
    }

    /// Bye for `team`: no opponent, already won.
    pub fn bye(team: impl Into<String>) -> Self {
        let team = team.into();
        Self {
            id: format!("{}-bye", team),
            team_a: team.clone(),
            team_b: BYE.to_string(),
            winner: Some(team),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_b == BYE
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether `name` may be picked as this match's winner.
    pub fn is_participant(&self, name: &str) -> bool {
        self.team_a == name || (!self.is_bye() && self.team_b == name)
    }

    pub fn involves(&self, name: &str) -> bool {
        self.team_a == name || self.team_b == name || self.winner.as_deref() == Some(name)
    }
}

/// Where the bracket stands.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BracketState {
    /// No rounds generated.
    Empty,
    /// At least one round exists and no champion yet.
    InProgress,
    /// Final round has a single decided match.
    Complete { champion: String },
}

/// Winners are persisted as text, `""` meaning undecided.
mod winner_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}
