use super::ReportError;
use crate::workflows::adoption::domain::AdoptionMatch;
use chrono::NaiveDate;
use serde::Serialize;

pub const DOCUMENT_TITLE: &str = "Dog Shelter Matching Results";

/// Column budget for wrapped answer lines in paginated output.
pub const WRAP_WIDTH: usize = 90;

/// Paginated report shape: one section per match. Backends (text, PDF)
/// consume this model; they never reach back into the match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub generated_on: NaiveDate,
    pub sections: Vec<MatchSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSection {
    pub dog_name: String,
    pub attribute_line: String,
    pub shelters: Vec<String>,
    pub response_blocks: Vec<ResponseBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBlock {
    pub shelter: String,
    pub lines: Vec<String>,
}

/// Builds the document model. Shelters are visited in match order; long
/// answers are word-wrapped to `WRAP_WIDTH`.
pub fn build(
    matches: &[AdoptionMatch],
    generated_on: NaiveDate,
) -> Result<ReportDocument, ReportError> {
    if matches.is_empty() {
        return Err(ReportError::EmptyMatchSet);
    }

    let sections = matches
        .iter()
        .map(|matched| {
            let response_blocks = matched
                .shelters
                .iter()
                .filter_map(|shelter| {
                    let answers = matched.responses_for(shelter)?;
                    if answers.is_empty() {
                        return None;
                    }

                    let lines = answers
                        .iter()
                        .flat_map(|(question, answer)| {
                            wrap_line(&format!("{}: {}", question.label(), answer), WRAP_WIDTH)
                        })
                        .collect();
                    Some(ResponseBlock {
                        shelter: shelter.clone(),
                        lines,
                    })
                })
                .collect();

            MatchSection {
                dog_name: matched.dog.name.clone(),
                attribute_line: format!(
                    "Size: {}, Age: {}, Energy: {}",
                    matched.dog.size, matched.dog.age, matched.dog.energy
                ),
                shelters: matched.shelters.clone(),
                response_blocks,
            }
        })
        .collect();

    Ok(ReportDocument {
        title: DOCUMENT_TITLE.to_string(),
        generated_on,
        sections,
    })
}

/// Greedy word wrap. Words longer than the width get a line of their own
/// rather than being split mid-word.
pub(crate) fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Continuous plain-text rendering, used for CLI previews.
pub fn render_text(document: &ReportDocument) -> String {
    let mut out = String::new();
    out.push_str(&document.title);
    out.push('\n');
    out.push_str(&format!("Generated {}\n", document.generated_on));

    for section in &document.sections {
        out.push('\n');
        out.push_str(&render_section(section));
    }

    out
}

pub(crate) fn render_section(section: &MatchSection) -> String {
    let mut out = String::new();
    out.push_str(&format!("Dog: {}\n", section.dog_name));
    out.push_str(&section.attribute_line);
    out.push('\n');

    out.push_str("Matching Shelters:\n");
    for shelter in &section.shelters {
        out.push_str(&format!("- {}\n", shelter));
    }

    if !section.response_blocks.is_empty() {
        out.push_str("Questionnaire Responses:\n");
        for block in &section.response_blocks {
            out.push_str(&format!("{}:\n", block.shelter));
            for line in &block.lines {
                out.push_str(&format!("  {}\n", line));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::adoption::domain::{AdoptionMatch, Dog, QuestionId};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date")
    }

    fn rex_match() -> AdoptionMatch {
        AdoptionMatch::new(
            Dog {
                name: "Rex".to_string(),
                size: 3,
                age: 2,
                energy: 4,
            },
            vec!["A".to_string()],
        )
    }

    #[test]
    fn one_section_per_match() {
        let matches = vec![rex_match(), rex_match()];
        let document = build(&matches, date()).expect("document builds");
        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].dog_name, "Rex");
        assert_eq!(
            document.sections[0].attribute_line,
            "Size: 3, Age: 2, Energy: 4"
        );
    }

    #[test]
    fn empty_matches_refuse_to_build() {
        let error = build(&[], date()).expect_err("nothing to render");
        assert!(matches!(error, ReportError::EmptyMatchSet));
    }

    #[test]
    fn long_answers_are_wrapped() {
        let mut matched = rex_match();
        let long_answer = "a ".repeat(120) + "end";
        matched.responses.insert(
            "A".to_string(),
            [(QuestionId::Q1, long_answer)].into_iter().collect(),
        );

        let document = build(&[matched], date()).expect("document builds");
        let block = &document.sections[0].response_blocks[0];
        assert!(block.lines.len() > 1);
        assert!(block.lines.iter().all(|line| line.len() <= WRAP_WIDTH));
    }

    #[test]
    fn wrap_keeps_words_intact() {
        let lines = wrap_line("Q1: the quick brown fox jumps over the lazy dog", 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 20);
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(
            lines.join(" "),
            "Q1: the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn wrap_of_blank_text_yields_single_empty_line() {
        assert_eq!(wrap_line("   ", 10), vec![String::new()]);
    }

    #[test]
    fn text_rendering_lists_shelters_as_bullets() {
        let document = build(&[rex_match()], date()).expect("document builds");
        let text = render_text(&document);
        assert!(text.starts_with("Dog Shelter Matching Results\n"));
        assert!(text.contains("Generated 2026-08-30"));
        assert!(text.contains("Matching Shelters:\n- A\n"));
        assert!(
            !text.contains("Questionnaire Responses:"),
            "no responses recorded, block must be absent"
        );
    }
}
