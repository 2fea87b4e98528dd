//! Tournament manager: team registry, league standings and knockout brackets.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    bracket_state, champion, clear_fixtures, compute_standings, generate_fixtures, generate_round,
    import_teams_csv, overview, record_score, reset_knockout, round_title, select_winner, set_score,
    standings, standings_to_csv, start_knockout, start_league, ImportReport, Overview,
    RandomShuffler, Shuffler, TitledRound,
};
pub use models::{
    BracketState, ErrorKind, KnockoutMatch, LeagueMatch, Mode, RenameReport, Round, Side,
    StandingsRow, Team, TeamId, Tournament, TournamentError, BYE, MIN_TEAMS,
};
pub use storage::{clear_tournament, load_tournament, save_tournament, FileStore, KeyValueStore, MemoryStore};
