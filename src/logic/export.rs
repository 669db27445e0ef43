//! Results export: the pick log as CSV.

use crate::models::Draft;

/// Write one CSV row per pick made so far, after a `pick,round,team,participant,picked_at` header.
pub fn results_csv(draft: &Draft) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["pick", "round", "team", "participant", "picked_at"])?;
    for pick in &draft.picks {
        writer.write_record([
            pick.number.to_string(),
            pick.round.to_string(),
            pick.team_name.clone(),
            pick.participant.name.clone(),
            pick.picked_at.to_rfc3339(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
