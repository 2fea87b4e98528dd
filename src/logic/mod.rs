//! Tournament business logic: league, knockout, session views and CSV.

mod csv_io;
mod knockout;
mod league;
mod overview;

pub use csv_io::{import_teams_csv, standings_to_csv, ImportReport};
pub use knockout::{
    bracket_state, champion, generate_round, reset_knockout, round_title, select_winner,
    start_knockout, RandomShuffler, Shuffler,
};
pub use league::{
    clear_fixtures, compute_standings, generate_fixtures, record_score, set_score, standings,
    start_league,
};
pub use overview::{overview, Overview, TitledRound};
