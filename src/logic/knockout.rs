//! Knockout (single elimination): round generation, winner selection and bracket progression.

use crate::models::{BracketState, KnockoutMatch, Round, Tournament, TournamentError, MIN_TEAMS};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Puts a round's participants in pairing order.
///
/// Implemented by [`RandomShuffler`] for real draws and by any `FnMut(&mut [String])`, so a fixed
/// order can be supplied where exact pairings matter.
pub trait Shuffler {
    fn shuffle(&mut self, names: &mut [String]);
}

/// Uniform random permutation backed by a `rand` RNG (thread RNG by default).
#[derive(Debug)]
pub struct RandomShuffler<R = ThreadRng> {
    rng: R,
}

impl RandomShuffler<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for RandomShuffler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomShuffler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle(&mut self, names: &mut [String]) {
        SliceRandom::shuffle(names, &mut self.rng);
    }
}

impl<F: FnMut(&mut [String])> Shuffler for F {
    fn shuffle(&mut self, names: &mut [String]) {
        self(names)
    }
}

/// Build one round: shuffle, then pair consecutively. An odd participant out gets a bye and is
/// recorded as winner straight away.
///
/// Match ids are unique within the round. Names containing `-` can produce the same id for two
/// pairings; later ones get a `#2`, `#3`, ... suffix.
pub fn generate_round<S: Shuffler + ?Sized>(mut participants: Vec<String>, shuffler: &mut S) -> Round {
    shuffler.shuffle(&mut participants);
    let mut round: Round = participants
        .chunks(2)
        .map(|pair| match pair {
            [a, b] => KnockoutMatch::new(a.as_str(), b.as_str()),
            [a] => KnockoutMatch::bye(a.as_str()),
            _ => unreachable!("chunks(2) yields one or two names"),
        })
        .collect();

    let mut seen = HashSet::with_capacity(round.len());
    for m in &mut round {
        let base = m.id.clone();
        let mut n = 1;
        while !seen.insert(m.id.clone()) {
            n += 1;
            m.id = format!("{}#{}", base, n);
        }
    }
    round
}

/// Start (or restart) the knockout cup with every registered team. Replaces any existing bracket.
pub fn start_knockout<S: Shuffler + ?Sized>(tournament: &mut Tournament, shuffler: &mut S) -> Result<(), TournamentError> {
    if tournament.teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            found: tournament.teams.len(),
        });
    }
    let names: Vec<String> = tournament.teams.iter().map(|t| t.name.clone()).collect();
    let round = generate_round(names, shuffler);
    log::debug!("Knockout started: {} teams, {} matches in round 1", tournament.teams.len(), round.len());
    tournament.knockout_rounds = vec![round];
    Ok(())
}

/// Set (or change) the winner of a match.
///
/// When this decides the last round and more than one team is still in, the next round is drawn
/// from the winners and appended. Changing a winner in an earlier round does not redraw rounds that
/// already exist.
pub fn select_winner<S: Shuffler + ?Sized>(
    tournament: &mut Tournament,
    round_index: usize,
    match_id: &str,
    winner: &str,
    shuffler: &mut S,
) -> Result<BracketState, TournamentError> {
    let rounds = &mut tournament.knockout_rounds;
    let is_last_round = round_index + 1 == rounds.len();
    let round = rounds
        .get_mut(round_index)
        .ok_or(TournamentError::RoundNotFound(round_index))?;
    let m = round
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if !m.is_participant(winner) {
        return Err(TournamentError::WinnerNotInMatch {
            winner: winner.to_string(),
            match_id: match_id.to_string(),
        });
    }
    m.winner = Some(winner.to_string());

    if is_last_round {
        if let Some(winners) = round_winners(round) {
            if winners.len() > 1 {
                let next = generate_round(winners, shuffler);
                log::debug!("Round {} decided; drew round {} with {} matches", round_index + 1, round_index + 2, next.len());
                rounds.push(next);
            }
        }
    }

    let state = bracket_state(&tournament.knockout_rounds);
    if let BracketState::Complete { champion } = &state {
        log::info!("Knockout complete, champion: {}", champion);
    }
    Ok(state)
}

/// Clear the bracket.
pub fn reset_knockout(tournament: &mut Tournament) {
    tournament.knockout_rounds.clear();
}

/// Winners of every match in match order, or `None` while any match is undecided.
fn round_winners(round: &[KnockoutMatch]) -> Option<Vec<String>> {
    round.iter().map(|m| m.winner.clone()).collect()
}

/// Champion: the winner of the final round when it is a single decided match.
pub fn champion(rounds: &[Round]) -> Option<&str> {
    match rounds.last()?.as_slice() {
        [only] => only.winner.as_deref(),
        _ => None,
    }
}

pub fn bracket_state(rounds: &[Round]) -> BracketState {
    if rounds.is_empty() {
        return BracketState::Empty;
    }
    match champion(rounds) {
        Some(name) => BracketState::Complete {
            champion: name.to_string(),
        },
        None => BracketState::InProgress,
    }
}

/// Display title for a round: "Final" for a last round with a single match, otherwise "Round N".
pub fn round_title(rounds: &[Round], index: usize) -> String {
    if index + 1 == rounds.len() && rounds[index].len() == 1 {
        "Final".to_string()
    } else {
        format!("Round {}", index + 1)
    }
}
