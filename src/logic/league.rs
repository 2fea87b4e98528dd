//! League (round-robin): fixture generation, score entry and standings.

use crate::models::{
    parse_score, LeagueMatch, Side, StandingsRow, Team, TeamId, Tournament, TournamentError, MIN_TEAMS,
};
use std::collections::HashMap;

/// Every unordered pair of teams, in registry order: (0,1), (0,2), ..., (n-2,n-1).
pub fn generate_fixtures(teams: &[Team]) -> Result<Vec<LeagueMatch>, TournamentError> {
    if teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            found: teams.len(),
        });
    }
    let fixtures = teams
        .iter()
        .enumerate()
        .flat_map(|(i, a)| teams[i + 1..].iter().map(move |b| LeagueMatch::between(a, b)))
        .collect();
    Ok(fixtures)
}

/// Generate (or regenerate) the league season, replacing any existing fixtures and scores.
///
/// Check [`Tournament::scored_fixture_count`] first if scores should not be lost silently.
pub fn start_league(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let fixtures = generate_fixtures(&tournament.teams)?;
    log::debug!(
        "Generated {} fixtures for {} teams (replacing {})",
        fixtures.len(),
        tournament.teams.len(),
        tournament.matches.len()
    );
    tournament.matches = fixtures;
    Ok(())
}

/// Drop all fixtures so the season can be started again.
pub fn clear_fixtures(tournament: &mut Tournament) {
    tournament.matches.clear();
}

/// Record a score as entered by a user. Blank clears it; otherwise it must be a non-negative integer.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: &str,
    side: Side,
    raw: &str,
) -> Result<(), TournamentError> {
    let fixture = tournament
        .fixture_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    let value = parse_score(raw).ok_or_else(|| TournamentError::InvalidScore(raw.to_string()))?;
    fixture.set_score(side, value);
    Ok(())
}

/// Typed variant of [`record_score`].
pub fn set_score(
    tournament: &mut Tournament,
    match_id: &str,
    side: Side,
    value: Option<u32>,
) -> Result<(), TournamentError> {
    tournament
        .fixture_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?
        .set_score(side, value);
    Ok(())
}

/// League table for the current team set.
///
/// One row per team in `teams`; only fixtures with both scores count, and fixtures naming a team
/// that is no longer registered are skipped. Teams are matched by id, so a rename keeps its results;
/// fixtures loaded without ids fall back to the current names. Sorted by points then wins, both
/// descending. Further ties keep registry order.
pub fn compute_standings(teams: &[Team], matches: &[LeagueMatch]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = teams.iter().map(StandingsRow::new).collect();
    let by_id: HashMap<&TeamId, usize> = teams.iter().enumerate().map(|(i, t)| (&t.id, i)).collect();
    let by_name: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let resolve = |id: &Option<TeamId>, name: &str| match id {
        Some(id) => by_id.get(id).copied(),
        None => by_name.get(name).copied(),
    };

    for m in matches {
        let (Some(a), Some(b)) = (m.score_a, m.score_b) else {
            continue;
        };
        let (Some(ia), Some(ib)) = (resolve(&m.team_a_id, &m.team_a), resolve(&m.team_b_id, &m.team_b)) else {
            continue;
        };
        if a > b {
            rows[ia].add_win();
            rows[ib].add_loss();
        } else if a < b {
            rows[ib].add_win();
            rows[ia].add_loss();
        } else {
            rows[ia].add_draw();
            rows[ib].add_draw();
        }
    }

    rows.sort_by(|x, y| y.points.cmp(&x.points).then(y.won.cmp(&x.won)));
    rows
}

/// Standings for the session's current teams and fixtures.
pub fn standings(tournament: &Tournament) -> Vec<StandingsRow> {
    compute_standings(&tournament.teams, &tournament.matches)
}

