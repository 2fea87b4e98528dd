//! Standings rows derived from league results.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// One line of the league table. Always recomputed from the fixture list, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: u32,
}

impl StandingsRow {
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team: team.name.clone(),
            played: 0,
            won: 0,
            draw: 0,
            lost: 0,
            points: 0,
        }
    }

    pub fn add_win(&mut self) {
        self.played += 1;
        self.won += 1;
        self.points += POINTS_FOR_WIN;
    }

    pub fn add_draw(&mut self) {
        self.played += 1;
        self.draw += 1;
        self.points += POINTS_FOR_DRAW;
    }

    pub fn add_loss(&mut self) {
        self.played += 1;
        self.lost += 1;
    }
}
