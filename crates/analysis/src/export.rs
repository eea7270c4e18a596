//! Download formats: the summary as plain text and the stats as CSV.

use thiserror::Error;

use crate::stats::StatRecord;

pub const SUMMARY_FILENAME: &str = "summary.txt";
pub const STATS_CSV_FILENAME: &str = "text_stats.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Summary download body.
pub fn summary_text(summary: &str) -> Vec<u8> {
    summary.as_bytes().to_vec()
}

/// `Metric,Count` CSV with one row per stat.
pub fn stats_csv(stats: &StatRecord) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Metric", "Count"])?;
    for (metric, value) in stats.rows() {
        writer.write_record([metric, value.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}
