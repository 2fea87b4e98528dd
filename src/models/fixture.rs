//! League fixtures: a single round-robin match and its score fields.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for a league fixture, built from the pair of team ids.
pub type FixtureId = String;

/// Which side of a fixture a score belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// One round-robin match. Scores are `None` until entered.
///
/// Names are display copies taken when the fixture was generated. Standings resolve teams through
/// the ids, which older snapshots lack.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMatch {
    pub id: FixtureId,
    pub team_a: String,
    pub team_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_a_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_b_id: Option<TeamId>,
    #[serde(default, with = "score_text")]
    pub score_a: Option<u32>,
    #[serde(default, with = "score_text")]
    pub score_b: Option<u32>,
}

impl LeagueMatch {
    /// Unscored fixture between two registered teams.
    pub fn between(a: &Team, b: &Team) -> Self {
        Self {
            id: fixture_id(&a.id, &b.id),
            team_a: a.name.clone(),
            team_b: b.name.clone(),
            team_a_id: Some(a.id.clone()),
            team_b_id: Some(b.id.clone()),
            score_a: None,
            score_b: None,
        }
    }

    pub fn score(&self, side: Side) -> Option<u32> {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub fn set_score(&mut self, side: Side, value: Option<u32>) {
        match side {
            Side::A => self.score_a = value,
            Side::B => self.score_b = value,
        }
    }

    /// Both scores entered; only these count towards standings.
    pub fn is_played(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    /// Has at least one score entered.
    pub fn has_any_score(&self) -> bool {
        self.score_a.is_some() || self.score_b.is_some()
    }

    pub fn involves(&self, name: &str) -> bool {
        self.team_a == name || self.team_b == name
    }
}

pub fn fixture_id(a: &TeamId, b: &TeamId) -> FixtureId {
    format!("{}-{}", a, b)
}

/// Parse a score as typed by a user: blank is unset, otherwise plain ASCII digits.
/// Returns `None` for input that is neither (signs included).
pub fn parse_score(raw: &str) -> Option<Option<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().map(Some)
}

/// Scores are persisted as text (`""` for unset). Loading accepts text or numbers and
/// coerces anything that is not a non-negative integer to unset.
mod score_text {
    use super::*;
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&n.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => parse_score(&s).flatten(),
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        })
    }
}
