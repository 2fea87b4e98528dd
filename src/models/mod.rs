//! Data structures for the tournament: teams, fixtures, standings, bracket, session state.

mod bracket;
mod fixture;
mod standings;
mod team;
mod tournament;

pub use bracket::{BracketState, KnockoutMatch, KnockoutMatchId, Round, BYE};
pub use fixture::{fixture_id, parse_score, FixtureId, LeagueMatch, Side};
pub use standings::{StandingsRow, POINTS_FOR_DRAW, POINTS_FOR_WIN};
pub use team::{Team, TeamId};
pub use tournament::{ErrorKind, Mode, RenameReport, Tournament, TournamentError, MIN_TEAMS};
