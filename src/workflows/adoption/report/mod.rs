mod backends;
mod csv;
pub mod document;
mod sink;

pub use backends::{
    DocumentBackend, PlainTextDocument, SpreadsheetBackend, TsvWorkbook, Worksheet,
};
pub use document::ReportDocument;
pub use sink::{FileSystemSink, ReportSink};

use super::domain::AdoptionMatch;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Base name shared by every exported artifact; downstream tooling keys off
/// `adoption_report.<ext>`.
pub const REPORT_BASENAME: &str = "adoption_report";

/// Column headers, in output order. The exact names are a compatibility
/// contract with downstream report consumers.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Dog Name",
    "Size",
    "Age",
    "Energy Level",
    "Matching Shelters",
    "Questionnaire Responses",
];

/// Worksheet name used by spreadsheet backends (first sheet only).
pub const WORKSHEET_NAME: &str = "Matches";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no matches available to export")]
    EmptyMatchSet,
    #[error("failed to encode report: {0}")]
    Encode(String),
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Supported export forms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Csv,
    Spreadsheet,
    Document,
}

/// One flattened output row per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Dog Name")]
    pub dog_name: String,
    #[serde(rename = "Size")]
    pub size: u32,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Energy Level")]
    pub energy: u32,
    #[serde(rename = "Matching Shelters")]
    pub matching_shelters: String,
    #[serde(rename = "Questionnaire Responses")]
    pub questionnaire_responses: String,
}

impl ReportRow {
    pub fn from_match(matched: &AdoptionMatch) -> Self {
        Self {
            dog_name: matched.dog.name.clone(),
            size: matched.dog.size,
            age: matched.dog.age,
            energy: matched.dog.energy,
            matching_shelters: matched.shelters.join(", "),
            questionnaire_responses: format_responses(matched),
        }
    }

    pub(crate) fn cells(&self) -> [String; 6] {
        [
            self.dog_name.clone(),
            self.size.to_string(),
            self.age.to_string(),
            self.energy.to_string(),
            self.matching_shelters.clone(),
            self.questionnaire_responses.clone(),
        ]
    }
}

/// Builds the flattened rows, refusing to render an empty match set so the
/// caller can prompt for new input instead of shipping a blank artifact.
pub fn report_rows(matches: &[AdoptionMatch]) -> Result<Vec<ReportRow>, ReportError> {
    if matches.is_empty() {
        return Err(ReportError::EmptyMatchSet);
    }

    Ok(matches.iter().map(ReportRow::from_match).collect())
}

/// Human-readable response block for one match: a header line per shelter
/// with recorded answers, one `Qn: answer` line per question, blocks
/// separated by a blank line. Shelters are visited in match order, and
/// shelters without any recorded answer are skipped entirely.
pub fn format_responses(matched: &AdoptionMatch) -> String {
    let mut blocks = Vec::new();

    for shelter in &matched.shelters {
        let answers = match matched.responses_for(shelter) {
            Some(answers) if !answers.is_empty() => answers,
            _ => continue,
        };

        let mut block = format!("{}:", shelter);
        for (question, answer) in answers {
            block.push_str(&format!("\n{}: {}", question.label(), answer));
        }
        blocks.push(block);
    }

    if blocks.is_empty() {
        "No responses".to_string()
    } else {
        blocks.join("\n\n")
    }
}

/// A rendered export ready for a sink or an HTTP download response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ReportArtifact {
    fn new(extension: &str, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{REPORT_BASENAME}.{extension}"),
            content_type,
            bytes,
        }
    }
}

/// Renders matches into export artifacts. CSV is encoded directly; the
/// spreadsheet and paginated-document binary layouts are owned by the
/// injected backends.
#[derive(Debug)]
pub struct ReportGenerator {
    spreadsheet: Box<dyn SpreadsheetBackend>,
    document: Box<dyn DocumentBackend>,
}

impl ReportGenerator {
    pub fn new(spreadsheet: Box<dyn SpreadsheetBackend>, document: Box<dyn DocumentBackend>) -> Self {
        Self {
            spreadsheet,
            document,
        }
    }

    /// Generator wired to the built-in text backends: a tab-separated single
    /// worksheet and a form-feed paginated plain-text document.
    pub fn with_default_backends() -> Self {
        Self::new(Box::new(TsvWorkbook), Box::new(PlainTextDocument))
    }

    pub fn render(
        &self,
        matches: &[AdoptionMatch],
        format: ReportFormat,
        generated_on: NaiveDate,
    ) -> Result<ReportArtifact, ReportError> {
        match format {
            ReportFormat::Csv => {
                let rows = report_rows(matches)?;
                let bytes = csv::encode(&rows)?;
                Ok(ReportArtifact::new("csv", "text/csv", bytes))
            }
            ReportFormat::Spreadsheet => {
                let rows = report_rows(matches)?;
                let sheet = Worksheet {
                    name: WORKSHEET_NAME,
                    header: &REPORT_COLUMNS,
                    rows: &rows,
                };
                let bytes = self.spreadsheet.encode(&sheet)?;
                Ok(ReportArtifact::new(
                    self.spreadsheet.extension(),
                    self.spreadsheet.content_type(),
                    bytes,
                ))
            }
            ReportFormat::Document => {
                let doc = document::build(matches, generated_on)?;
                let bytes = self.document.encode(&doc)?;
                Ok(ReportArtifact::new(
                    self.document.extension(),
                    self.document.content_type(),
                    bytes,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::adoption::domain::{Dog, QuestionId};

    fn matched(name: &str, shelters: &[&str]) -> AdoptionMatch {
        AdoptionMatch::new(
            Dog {
                name: name.to_string(),
                size: 3,
                age: 2,
                energy: 4,
            },
            shelters.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date")
    }

    #[test]
    fn row_flattens_dog_attributes_and_shelters() {
        let row = ReportRow::from_match(&matched("Rex", &["A", "B"]));
        assert_eq!(row.dog_name, "Rex");
        assert_eq!(row.size, 3);
        assert_eq!(row.matching_shelters, "A, B");
        assert_eq!(row.questionnaire_responses, "No responses");
    }

    #[test]
    fn format_responses_builds_per_shelter_blocks() {
        let mut m = matched("Rex", &["A", "B"]);
        m.responses.insert(
            "A".to_string(),
            [(QuestionId::Q1, "yes".to_string())].into_iter().collect(),
        );
        assert_eq!(format_responses(&m), "A:\nQ1: yes");

        m.responses.insert(
            "B".to_string(),
            [
                (QuestionId::Q1, "no".to_string()),
                (QuestionId::Q2, "small yard".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            format_responses(&m),
            "A:\nQ1: yes\n\nB:\nQ1: no\nQ2: small yard"
        );
    }

    #[test]
    fn format_responses_skips_shelters_with_empty_answer_sets() {
        let mut m = matched("Rex", &["A", "B"]);
        m.responses
            .insert("A".to_string(), Default::default());
        assert_eq!(format_responses(&m), "No responses");
    }

    #[test]
    fn empty_match_set_refuses_to_render() {
        let generator = ReportGenerator::with_default_backends();
        for format in [
            ReportFormat::Csv,
            ReportFormat::Spreadsheet,
            ReportFormat::Document,
        ] {
            let error = generator
                .render(&[], format, date())
                .expect_err("nothing to export");
            assert!(matches!(error, ReportError::EmptyMatchSet));
        }
    }

    #[test]
    fn artifacts_use_the_deterministic_base_name() {
        let generator = ReportGenerator::with_default_backends();
        let matches = vec![matched("Rex", &["A"])];

        let csv = generator
            .render(&matches, ReportFormat::Csv, date())
            .expect("csv renders");
        assert_eq!(csv.file_name, "adoption_report.csv");
        assert_eq!(csv.content_type, "text/csv");

        let sheet = generator
            .render(&matches, ReportFormat::Spreadsheet, date())
            .expect("spreadsheet renders");
        assert_eq!(sheet.file_name, "adoption_report.tsv");

        let doc = generator
            .render(&matches, ReportFormat::Document, date())
            .expect("document renders");
        assert_eq!(doc.file_name, "adoption_report.txt");
    }

    #[test]
    fn row_count_equals_match_count() {
        let matches = vec![matched("Rex", &["A"]), matched("Bella", &["A", "B"])];
        let rows = report_rows(&matches).expect("rows build");
        assert_eq!(rows.len(), matches.len());
    }
}
