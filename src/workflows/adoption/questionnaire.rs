//! Collects post-match questionnaire answers onto existing matches.
//!
//! Sequencing (which match is "current") belongs to the caller; every
//! function here is a pure update over the data passed in.

use super::domain::{AdoptionMatch, QuestionId, ShelterResponses};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("match index {0} is out of range")]
    MatchIndexOutOfRange(usize),
    #[error("shelter '{0}' is not attached to this match")]
    UnknownShelter(String),
}

/// One shelter-group submission addressed by `(match_index, shelter)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSubmission {
    pub match_index: usize,
    pub shelter: String,
    #[serde(default)]
    pub answers: ShelterResponses,
}

/// Records answers for one shelter on a match. Re-submitting for the same
/// shelter replaces its prior answers entirely; there is no per-question
/// merge.
pub fn record_responses(
    matched: &mut AdoptionMatch,
    shelter: &str,
    answers: ShelterResponses,
) -> Result<(), QuestionnaireError> {
    if !matched.includes_shelter(shelter) {
        return Err(QuestionnaireError::UnknownShelter(shelter.to_owned()));
    }

    matched.responses.insert(shelter.to_owned(), answers);
    Ok(())
}

/// Applies a batch of submissions keyed by match index, in submission order.
pub fn apply_submissions(
    matches: &mut [AdoptionMatch],
    submissions: Vec<ResponseSubmission>,
) -> Result<(), QuestionnaireError> {
    for submission in submissions {
        let matched = matches
            .get_mut(submission.match_index)
            .ok_or(QuestionnaireError::MatchIndexOutOfRange(
                submission.match_index,
            ))?;
        record_responses(matched, &submission.shelter, submission.answers)?;
    }

    Ok(())
}

/// Extracts one shelter's answers from a flat form submission keyed
/// `{shelter}_q{n}` with n in 1..=5. Questions absent from the form are
/// simply absent from the result, never defaulted to an empty string.
pub fn answers_from_form(
    form: &BTreeMap<String, String>,
    shelter: &str,
) -> ShelterResponses {
    let mut answers = ShelterResponses::new();

    for question in QuestionId::ordered() {
        let key = format!("{}_q{}", shelter, question.number());
        if let Some(answer) = form.get(&key) {
            answers.insert(question, answer.clone());
        }
    }

    answers
}
