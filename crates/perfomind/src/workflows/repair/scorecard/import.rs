//! CSV ingestion for weekly KPI exports: a `week` column plus arbitrary
//! metric columns. Cells stay raw strings and flow through the same tolerant
//! metric parsing as store documents.

use std::io::Read;

use serde_json::Value;

use super::kpi::WeeklyKpiRecord;

#[derive(Debug, thiserror::Error)]
pub enum KpiImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("KPI export is missing a 'week' column")]
    MissingWeekColumn,
    #[error("line {line}: '{value}' is not a valid week number")]
    InvalidWeek { line: u64, value: String },
}

/// Parse a KPI CSV export into weekly records, sorted ascending by week.
pub fn parse_kpi_csv<R: Read>(reader: R) -> Result<Vec<WeeklyKpiRecord>, KpiImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let week_index = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case("week"))
        .ok_or(KpiImportError::MissingWeekColumn)?;

    let mut records = Vec::new();
    for (offset, row) in csv_reader.records().enumerate() {
        let row = row?;
        // Header occupies line 1.
        let line = offset as u64 + 2;

        let raw_week = row.get(week_index).unwrap_or_default();
        let week = raw_week
            .parse::<u32>()
            .map_err(|_| KpiImportError::InvalidWeek {
                line,
                value: raw_week.to_string(),
            })?;

        let mut record = WeeklyKpiRecord::new(week);
        for (index, cell) in row.iter().enumerate() {
            if index == week_index || cell.is_empty() {
                continue;
            }
            let name = match headers.get(index) {
                Some(name) if !name.is_empty() => name,
                _ => continue,
            };
            record
                .metrics
                .insert(name.to_string(), Value::String(cell.to_string()));
        }
        records.push(record);
    }

    records.sort_by_key(|record| record.week);
    Ok(records)
}
