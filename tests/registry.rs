//! Integration tests for the team registry: add, rename, delete.

use tournament_manager::{
    start_knockout, start_league, ErrorKind, TeamId, Tournament, TournamentError,
};

fn identity(_: &mut [String]) {}

#[test]
fn add_trims_and_keeps_casing() {
    let mut t = Tournament::new();
    let team = t.add_team("  Red Lions ").unwrap();
    assert_eq!(team.name, "Red Lions");
    assert_eq!(t.teams.len(), 1);
    assert_eq!(t.teams[0], team);
}

#[test]
fn add_rejects_blank_name() {
    let mut t = Tournament::new();
    let err = t.add_team("  ").unwrap_err();
    assert_eq!(err, TournamentError::EmptyName);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(t.teams.is_empty());
}

#[test]
fn add_rejects_case_insensitive_duplicate() {
    let mut t = Tournament::new();
    t.add_team("Alpha").unwrap();
    let err = t.add_team("alpha").unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateTeamName(_)));
    assert_eq!(err.kind(), ErrorKind::Duplicate);
    assert_eq!(t.teams.len(), 1);
}

#[test]
fn add_rejects_bye_marker() {
    let mut t = Tournament::new();
    let err = t.add_team("bye").unwrap_err();
    assert!(matches!(err, TournamentError::ReservedName(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn with_teams_reports_the_first_invalid_name() {
    assert_eq!(Tournament::with_teams(["A", " "]), Err(TournamentError::EmptyName));
    assert!(matches!(
        Tournament::with_teams(["Alpha", "ALPHA"]),
        Err(TournamentError::DuplicateTeamName(_))
    ));
    assert!(matches!(Tournament::with_teams(["Bye"]), Err(TournamentError::ReservedName(_))));
}

#[test]
fn ids_are_unique() {
    let t = Tournament::with_teams(["A", "B", "C", "D"]).unwrap();
    let mut ids: Vec<&TeamId> = t.teams.iter().map(|team| &team.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn rename_keeps_id_and_validates_against_others() {
    let mut t = Tournament::with_teams(["Alpha", "Beta"]).unwrap();
    let alpha = t.teams[0].id.clone();

    let err = t.rename_team(&alpha, "BETA").unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateTeamName(_)));
    assert_eq!(t.teams[0].name, "Alpha");

    assert_eq!(t.rename_team(&alpha, " ").unwrap_err(), TournamentError::EmptyName);

    // Changing only the casing of its own name is fine.
    let report = t.rename_team(&alpha, "ALPHA").unwrap();
    assert_eq!(report.team.id, alpha);
    assert_eq!(report.previous_name, "Alpha");
    assert_eq!(t.teams[0].name, "ALPHA");
}

#[test]
fn rename_unknown_team_is_not_found() {
    let mut t = Tournament::with_teams(["Alpha"]).unwrap();
    let err = t.rename_team(&TeamId::from("nope"), "Gamma").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn rename_leaves_existing_matches_and_reports_them() {
    let mut t = Tournament::with_teams(["A", "B", "C"]).unwrap();
    start_league(&mut t).unwrap();
    start_knockout(&mut t, &mut identity).unwrap();
    let a = t.teams[0].id.clone();

    let report = t.rename_team(&a, "Aces").unwrap();

    assert!(report.has_stale_references());
    assert_eq!(report.stale_fixtures, 2);
    // Identity order pairs A with B, C gets a bye.
    assert_eq!(report.stale_bracket_matches, 1);
    assert!(t.matches.iter().any(|m| m.team_a == "A"));
    assert!(t.matches.iter().all(|m| m.team_a != "Aces" && m.team_b != "Aces"));
}

#[test]
fn rename_without_matches_reports_nothing_stale() {
    let mut t = Tournament::with_teams(["A", "B"]).unwrap();
    let a = t.teams[0].id.clone();
    let report = t.rename_team(&a, "Aces").unwrap();
    assert!(!report.has_stale_references());
}

#[test]
fn delete_cascades_to_fixtures_and_bracket() {
    let mut t = Tournament::with_teams(["A", "B", "C"]).unwrap();
    start_league(&mut t).unwrap();
    start_knockout(&mut t, &mut identity).unwrap();
    assert!(t.has_fixtures());
    assert!(t.has_bracket());

    let c = t.teams[2].id.clone();
    let removed = t.delete_team(&c).unwrap();

    assert_eq!(removed.name, "C");
    assert_eq!(t.teams.len(), 2);
    assert!(t.matches.is_empty());
    assert!(t.knockout_rounds.is_empty());
}

#[test]
fn delete_unknown_team_changes_nothing() {
    let mut t = Tournament::with_teams(["A", "B"]).unwrap();
    start_league(&mut t).unwrap();
    let before = t.clone();

    let err = t.delete_team(&TeamId::from("missing")).unwrap_err();

    assert!(matches!(err, TournamentError::TeamNotFound(_)));
    assert_eq!(t, before);
}

#[test]
fn find_team_by_name_ignores_case_and_whitespace() {
    let t = Tournament::with_teams(["Red Lions"]).unwrap();
    assert_eq!(t.find_team_by_name(" red lions ").map(|team| team.name.as_str()), Some("Red Lions"));
    assert!(t.find_team_by_name("Blue").is_none());
}
