//! Integration tests for CSV team import and standings export.

use tournament_manager::{
    import_teams_csv, set_score, standings, standings_to_csv, start_league, Side, Tournament,
};

#[test]
fn import_adds_names_and_reports_rejects() {
    let mut t = Tournament::with_teams(["Alpha"]).unwrap();
    let csv = "name\nBeta\n  Gamma  \n\nalpha\nbye\n";

    let report = import_teams_csv(&mut t, csv.as_bytes()).unwrap();

    let added: Vec<&str> = report.added.iter().map(|team| team.name.as_str()).collect();
    assert_eq!(added, vec!["Beta", "Gamma"]);
    let rejected: Vec<&str> = report.rejected.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(rejected, vec!["alpha", "bye"]);
    assert_eq!(t.teams.len(), 3);
}

#[test]
fn import_uses_first_column_only() {
    let mut t = Tournament::new();
    let report = import_teams_csv(&mut t, "Reds,red\nBlues,blue,extra\n".as_bytes()).unwrap();
    assert_eq!(report.added.len(), 2);
    assert_eq!(t.teams[1].name, "Blues");
}

#[test]
fn import_of_invalid_utf8_adds_nothing() {
    let mut t = Tournament::new();
    let bytes: &[u8] = b"Good\n\xff\xfe\n";
    assert!(import_teams_csv(&mut t, bytes).is_err());
    assert!(t.teams.is_empty());
}

#[test]
fn standings_export_has_header_and_rows() {
    let mut t = Tournament::with_teams(["A", "B"]).unwrap();
    start_league(&mut t).unwrap();
    let id = t.matches[0].id.clone();
    set_score(&mut t, &id, Side::A, Some(0)).unwrap();
    set_score(&mut t, &id, Side::B, Some(1)).unwrap();

    let csv = standings_to_csv(&standings(&t)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "position,team,played,won,draw,lost,points");
    assert_eq!(lines[1], "1,B,1,1,0,0,3");
    assert_eq!(lines[2], "2,A,1,0,0,1,0");
}
