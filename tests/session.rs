//! Integration tests for the tournament session: mode, reset, snapshots and the mode overview.

use serde_json::json;
use tournament_manager::{
    overview, select_winner, set_score, start_knockout, start_league, BracketState, Mode, Overview,
    Side, TeamId, Tournament,
};

fn keep_order(_: &mut [String]) {}

fn busy_tournament() -> Tournament {
    let mut t = Tournament::with_teams(["A", "B", "C"]).unwrap();
    start_league(&mut t).unwrap();
    let id = t.matches[0].id.clone();
    set_score(&mut t, &id, Side::A, Some(2)).unwrap();
    set_score(&mut t, &id, Side::B, Some(0)).unwrap();
    start_knockout(&mut t, &mut keep_order).unwrap();
    select_winner(&mut t, 0, "A-B", "A", &mut keep_order).unwrap();
    t.set_mode(Mode::Knockout);
    t
}

#[test]
fn new_session_is_empty_league() {
    let t = Tournament::new();
    assert!(t.is_empty());
    assert_eq!(t.mode, Mode::League);
    assert!(!t.has_fixtures());
    assert!(!t.has_bracket());
}

#[test]
fn destructive_conditions_are_observable() {
    let t = busy_tournament();
    assert!(!t.is_empty());
    assert!(t.has_fixtures());
    assert_eq!(t.scored_fixture_count(), 1);
    assert!(t.has_bracket());
}

#[test]
fn reset_all_clears_everything() {
    let mut t = busy_tournament();
    t.reset_all();
    assert_eq!(t, Tournament::new());
    assert_eq!(t.mode, Mode::League);
}

#[test]
fn snapshot_round_trip_preserves_state() {
    let t = busy_tournament();
    let restored = Tournament::from_snapshot(Some(&t.to_snapshot()));
    assert_eq!(restored, t);
}

#[test]
fn snapshot_uses_persisted_field_layout() {
    let t = busy_tournament();
    let snap = t.to_snapshot();

    assert_eq!(snap["mode"], "knockout");
    let m = &snap["matches"][0];
    assert_eq!(m["teamA"], "A");
    assert_eq!(m["scoreA"], "2");
    assert_eq!(m["scoreB"], "0");
    assert_eq!(snap["matches"][1]["scoreA"], "");

    let first_round = &snap["knockoutRounds"][0];
    assert_eq!(first_round[0]["winner"], "A");
    assert_eq!(first_round[1]["teamB"], "BYE");
    assert_eq!(snap["knockoutRounds"][1][0]["winner"], "");
}

#[test]
fn missing_or_broken_snapshot_is_a_fresh_session() {
    assert_eq!(Tournament::from_snapshot(None), Tournament::new());
    assert_eq!(Tournament::from_snapshot(Some(&json!(null))), Tournament::new());
    assert_eq!(Tournament::from_snapshot(Some(&json!("garbage"))), Tournament::new());
    assert_eq!(Tournament::from_snapshot(Some(&json!({ "teams": 5 }))), Tournament::new());
    assert_eq!(Tournament::from_snapshot(Some(&json!({}))), Tournament::new());
}

#[test]
fn snapshot_accepts_numeric_ids_and_loose_scores() {
    let snap = json!({
        "teams": [{ "id": 1700000000000u64, "name": "A" }, { "id": "b", "name": "B" }],
        "mode": "league",
        "matches": [
            { "id": "1700000000000-b", "teamA": "A", "teamB": "B", "scoreA": 3, "scoreB": "x" }
        ],
        "knockoutRounds": []
    });
    let t = Tournament::from_snapshot(Some(&snap));

    assert_eq!(t.teams[0].id, TeamId::from("1700000000000"));
    assert_eq!(t.matches[0].score_a, Some(3));
    assert_eq!(t.matches[0].score_b, None);
}

#[test]
fn overview_follows_mode() {
    let mut t = busy_tournament();

    match overview(&t) {
        Overview::Knockout { rounds, state } => {
            assert_eq!(rounds.len(), 2);
            assert_eq!(rounds[0].title, "Round 1");
            assert_eq!(rounds[1].title, "Final");
            assert_eq!(state, BracketState::InProgress);
        }
        Overview::League { .. } => panic!("expected knockout overview"),
    }

    t.set_mode(Mode::League);
    match overview(&t) {
        Overview::League { fixtures, standings } => {
            assert_eq!(fixtures.len(), 3);
            assert_eq!(standings[0].team, "A");
            assert_eq!(standings[0].points, 3);
        }
        Overview::Knockout { .. } => panic!("expected league overview"),
    }
}
