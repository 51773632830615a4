use super::{ReportError, ReportRow};

/// Encodes rows as CSV with a header row. Headers come from the serde
/// renames on `ReportRow`, keeping them in lockstep with `REPORT_COLUMNS`.
pub(crate) fn encode(rows: &[ReportRow]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| ReportError::Encode(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| ReportError::Encode(err.to_string()))
}
