//! CSV import of team names and export of the league table.

use crate::models::{StandingsRow, Team, Tournament, TournamentError};
use serde::Serialize;
use std::io::Read;

/// Outcome of a bulk team import. Each row is added or rejected on its own.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportReport {
    pub added: Vec<Team>,
    /// Rejected names with the reason.
    pub rejected: Vec<(String, String)>,
}

/// Add teams from CSV, one name per row in the first column. A leading `name` header row and
/// blank rows are skipped.
pub fn import_teams_csv<R: Read>(tournament: &mut Tournament, reader: R) -> Result<ImportReport, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Read everything first so a malformed file adds nothing.
    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TournamentError::InvalidCsv(e.to_string()))?;
        let name = record.get(0).unwrap_or("").to_string();
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        if name.is_empty() {
            continue;
        }
        names.push(name);
    }

    let mut report = ImportReport::default();
    for name in names {
        match tournament.add_team(name.as_str()) {
            Ok(team) => report.added.push(team),
            Err(e) => report.rejected.push((name, e.to_string())),
        }
    }
    log::debug!("Imported {} team(s), rejected {}", report.added.len(), report.rejected.len());
    Ok(report)
}

/// Render standings as CSV with a header row, in table order.
pub fn standings_to_csv(rows: &[StandingsRow]) -> Result<String, TournamentError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let to_err = |e: csv::Error| TournamentError::InvalidCsv(e.to_string());
    wtr.write_record(["position", "team", "played", "won", "draw", "lost", "points"])
        .map_err(to_err)?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            row.team.clone(),
            row.played.to_string(),
            row.won.to_string(),
            row.draw.to_string(),
            row.lost.to_string(),
            row.points.to_string(),
        ])
        .map_err(to_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| TournamentError::InvalidCsv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::InvalidCsv(e.to_string()))
}
