//! Mode-dependent view of the session, for the presentation layer.

use crate::logic::knockout::{bracket_state, round_title};
use crate::logic::league::standings;
use crate::models::{BracketState, LeagueMatch, Mode, Round, StandingsRow, Tournament};
use serde::Serialize;

/// A bracket round together with its display title.
#[derive(Clone, Debug, Serialize)]
pub struct TitledRound<'a> {
    pub title: String,
    pub matches: &'a Round,
}

/// What the active mode has to show.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Overview<'a> {
    League {
        fixtures: &'a [LeagueMatch],
        standings: Vec<StandingsRow>,
    },
    Knockout {
        rounds: Vec<TitledRound<'a>>,
        state: BracketState,
    },
}

pub fn overview(tournament: &Tournament) -> Overview<'_> {
    match tournament.mode {
        Mode::League => Overview::League {
            fixtures: &tournament.matches,
            standings: standings(tournament),
        },
        Mode::Knockout => {
            let rounds = &tournament.knockout_rounds;
            Overview::Knockout {
                rounds: rounds
                    .iter()
                    .enumerate()
                    .map(|(i, matches)| TitledRound {
                        title: round_title(rounds, i),
                        matches,
                    })
                    .collect(),
                state: bracket_state(rounds),
            }
        }
    }
}
