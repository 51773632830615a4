//! Dog-to-shelter matching workflow: roster loading, range-intersection
//! matching, questionnaire collection, and report export.

pub mod domain;
mod loader;
mod matcher;
pub mod questionnaire;
pub mod report;

pub use domain::{AdoptionMatch, AttributeRange, Dog, QuestionId, Shelter, ShelterResponses};
pub use loader::{
    load_dogs, load_dogs_from_path, load_shelters, load_shelters_from_path, LoadError,
};
pub use matcher::find_matches;
