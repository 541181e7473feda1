use super::diff::{diff_profile, DiffSummary};
use super::models::Profile;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes one row per question (question, user, standard, result) plus a
    /// trailing score row. Returns the filename on success.
    pub fn export_results(profile: &Profile, filename: &str) -> Result<String, String> {
        let entries = diff_profile(profile);
        let summary = DiffSummary::from_entries(&entries);

        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;
        writer
            .write_record(["question", "user", "standard", "result"])
            .map_err(|e| e.to_string())?;

        for entry in &entries {
            writer
                .write_record([
                    entry.id.to_string().as_str(),
                    entry.user.as_deref().unwrap_or(""),
                    entry.standard.as_deref().unwrap_or(""),
                    entry.status.symbol(),
                ])
                .map_err(|e| e.to_string())?;
        }

        let score = match summary.score_percent() {
            Some(percent) => format!("{:.1}%", percent),
            None => "n/a".to_string(),
        };
        writer
            .write_record(["score", "", "", score.as_str()])
            .map_err(|e| e.to_string())?;

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}
