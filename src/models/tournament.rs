//! Tournament session: team registry, active mode, league fixtures and knockout rounds.

use crate::models::bracket::{Round, BYE};
use crate::models::fixture::LeagueMatch;
use crate::models::team::{names_match, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum number of teams for either competition format.
pub const MIN_TEAMS: usize = 2;

/// Broad category of a [`TournamentError`], for callers that only care about the class of failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Empty or malformed input.
    Validation,
    /// Team name collision.
    Duplicate,
    /// Fewer teams than the action requires.
    InsufficientTeams,
    /// Unknown team, fixture, round or match.
    NotFound,
}

/// Errors that can occur during tournament operations. None of them leave partial changes behind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Team name is empty after trimming.
    EmptyName,
    /// Team name collides with the bye marker.
    ReservedName(String),
    /// Score is not blank and not a non-negative integer.
    InvalidScore(String),
    /// Chosen winner does not play in the match.
    WinnerNotInMatch { winner: String, match_id: String },
    /// CSV input could not be read.
    InvalidCsv(String),
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// Not enough teams to generate matches.
    NotEnoughTeams { required: usize, found: usize },
    TeamNotFound(TeamId),
    MatchNotFound(String),
    RoundNotFound(usize),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            EmptyName | ReservedName(_) | InvalidScore(_) | WinnerNotInMatch { .. } | InvalidCsv(_) => {
                ErrorKind::Validation
            }
            DuplicateTeamName(_) => ErrorKind::Duplicate,
            NotEnoughTeams { .. } => ErrorKind::InsufficientTeams,
            TeamNotFound(_) | MatchNotFound(_) | RoundNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Team name cannot be empty"),
            TournamentError::ReservedName(name) => write!(f, "\"{}\" is reserved and cannot be a team name", name),
            TournamentError::InvalidScore(raw) => {
                write!(f, "Score must be a non-negative whole number (got \"{}\")", raw)
            }
            TournamentError::WinnerNotInMatch { winner, match_id } => {
                write!(f, "{} does not play in match {}", winner, match_id)
            }
            TournamentError::InvalidCsv(msg) => write!(f, "Could not read CSV: {}", msg),
            TournamentError::DuplicateTeamName(name) => write!(f, "Team \"{}\" already exists", name),
            TournamentError::NotEnoughTeams { required, found } => {
                write!(f, "Need at least {} teams (have {})", required, found)
            }
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::RoundNotFound(index) => write!(f, "Round {} not found", index + 1),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Which competition the session is showing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    League,
    Knockout,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::League => "league",
            Mode::Knockout => "knockout",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "league" => Ok(Mode::League),
            "knockout" => Ok(Mode::Knockout),
            other => Err(format!("unknown mode \"{}\"", other)),
        }
    }
}

/// What a rename left pointing at the old name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameReport {
    pub team: Team,
    pub previous_name: String,
    /// League fixtures still naming the team by its old name.
    pub stale_fixtures: usize,
    /// Knockout matches still naming the team by its old name.
    pub stale_bracket_matches: usize,
}

impl RenameReport {
    pub fn has_stale_references(&self) -> bool {
        self.stale_fixtures > 0 || self.stale_bracket_matches > 0
    }
}

/// Full session state. This is the unit that gets persisted and restored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    /// Registered teams, in registration order.
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub mode: Mode,
    /// League fixtures. Replaced wholesale on regeneration.
    #[serde(default)]
    pub matches: Vec<LeagueMatch>,
    /// Knockout bracket, append-only while in progress.
    #[serde(default)]
    pub knockout_rounds: Vec<Round>,
}

impl Tournament {
    /// Fresh session: no teams, league mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given team names. Stops at the first name that fails validation.
    pub fn with_teams<I, S>(names: I) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tournament = Self::new();
        for name in names {
            tournament.add_team(name)?;
        }
        Ok(tournament)
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    /// Look up a team by name, ignoring case.
    pub fn find_team_by_name(&self, name: &str) -> Option<&Team> {
        let name = name.trim();
        self.teams.iter().find(|t| t.has_name(name))
    }

    /// Add a team. Names are trimmed and must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<Team, TournamentError> {
        let name = self.validate_name(&name.into(), None)?;
        let team = Team::new(name);
        log::debug!("Added team {} ({})", team.name, team.id);
        self.teams.push(team.clone());
        Ok(team)
    }

    /// Rename a team in place. Fixtures and bracket entries keep the old name as display text; the
    /// report says how many. Standings follow fixtures by team id, so league results carry over.
    pub fn rename_team(&mut self, id: &TeamId, new_name: impl Into<String>) -> Result<RenameReport, TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TournamentError::TeamNotFound(id.clone()))?;
        let name = self.validate_name(&new_name.into(), Some(id))?;

        let previous_name = std::mem::replace(&mut self.teams[idx].name, name);
        let stale_fixtures = self.matches.iter().filter(|m| m.involves(&previous_name)).count();
        let stale_bracket_matches = self
            .knockout_rounds
            .iter()
            .flatten()
            .filter(|m| m.involves(&previous_name))
            .count();
        let report = RenameReport {
            team: self.teams[idx].clone(),
            previous_name,
            stale_fixtures,
            stale_bracket_matches,
        };
        if report.has_stale_references() {
            log::warn!(
                "Renamed {} to {}: {} fixture(s) and {} bracket match(es) still use the old name",
                report.previous_name,
                report.team.name,
                stale_fixtures,
                stale_bracket_matches
            );
        }
        Ok(report)
    }

    /// Remove a team. Fixtures and knockout rounds are cleared since both were built from the old team set.
    pub fn delete_team(&mut self, id: &TeamId) -> Result<Team, TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TournamentError::TeamNotFound(id.clone()))?;
        let team = self.teams.remove(idx);
        self.matches.clear();
        self.knockout_rounds.clear();
        log::debug!("Deleted team {}; fixtures and bracket cleared", team.name);
        Ok(team)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Drop everything and return to a fresh league-mode session.
    pub fn reset_all(&mut self) {
        *self = Self::new();
        log::info!("Tournament reset");
    }

    /// No teams, fixtures or rounds.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.matches.is_empty() && self.knockout_rounds.is_empty()
    }

    pub fn has_fixtures(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Fixtures with at least one score entered; regenerating would discard these.
    pub fn scored_fixture_count(&self) -> usize {
        self.matches.iter().filter(|m| m.has_any_score()).count()
    }

    pub fn has_bracket(&self) -> bool {
        !self.knockout_rounds.is_empty()
    }

    pub fn fixture_mut(&mut self, id: &str) -> Option<&mut LeagueMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn fixture(&self, id: &str) -> Option<&LeagueMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Serialize to a JSON value. Pure; writing it anywhere is the caller's job.
    pub fn to_snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Restore from a snapshot. A missing, null or malformed snapshot gives a fresh session.
    pub fn from_snapshot(snapshot: Option<&serde_json::Value>) -> Self {
        match snapshot {
            None | Some(serde_json::Value::Null) => Self::new(),
            Some(value) => match Self::deserialize(value) {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Ignoring unreadable tournament snapshot: {}", e);
                    Self::new()
                }
            },
        }
    }

    /// Trim and check a candidate name against the registry, ignoring `except` (the team being renamed).
    fn validate_name(&self, raw: &str, except: Option<&TeamId>) -> Result<String, TournamentError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if names_match(name, BYE) {
            return Err(TournamentError::ReservedName(name.to_string()));
        }
        let is_duplicate = self
            .teams
            .iter()
            .filter(|t| Some(&t.id) != except)
            .any(|t| t.has_name(name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        Ok(name.to_string())
    }
}
