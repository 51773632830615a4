use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Profile of a dog available for placement. Attribute values are taken
/// verbatim from the intake roster; size and energy are nominally on a 1-5
/// scale but are not range-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub size: u32,
    pub age: u32,
    pub energy: u32,
}

/// Inclusive numeric bounds for one acceptance attribute. `min == max` is a
/// valid single-point range. `min <= max` is a caller contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub min: u32,
    pub max: u32,
}

impl AttributeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn contains(self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Shelter acceptance criteria over the three dog attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub name: String,
    pub size: AttributeRange,
    pub age: AttributeRange,
    pub energy: AttributeRange,
}

impl Shelter {
    /// Suitability test: all three attributes must lie within the shelter's
    /// inclusive bounds. No partial credit.
    pub fn accepts(&self, dog: &Dog) -> bool {
        self.size.contains(dog.size)
            && self.age.contains(dog.age)
            && self.energy.contains(dog.energy)
    }
}

/// Identifier for one of the five fixed questionnaire questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
}

impl QuestionId {
    pub const fn ordered() -> [Self; 5] {
        [Self::Q1, Self::Q2, Self::Q3, Self::Q4, Self::Q5]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::Q5 => "Q5",
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
            Self::Q5 => 5,
        }
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            5 => Some(Self::Q5),
            _ => None,
        }
    }
}

/// Answers recorded for a single shelter, keyed by question.
pub type ShelterResponses = BTreeMap<QuestionId, String>;

/// One dog paired with every shelter whose acceptance ranges include it,
/// plus the questionnaire answers accumulated per shelter.
///
/// Shelter names keep roster order. Responses start empty and are filled by
/// the questionnaire collector one shelter at a time; report rendering walks
/// `shelters` rather than the response map so output order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionMatch {
    pub dog: Dog,
    pub shelters: Vec<String>,
    #[serde(default)]
    pub responses: BTreeMap<String, ShelterResponses>,
}

impl AdoptionMatch {
    pub fn new(dog: Dog, shelters: Vec<String>) -> Self {
        Self {
            dog,
            shelters,
            responses: BTreeMap::new(),
        }
    }

    pub fn includes_shelter(&self, shelter: &str) -> bool {
        self.shelters.iter().any(|name| name == shelter)
    }

    pub fn responses_for(&self, shelter: &str) -> Option<&ShelterResponses> {
        self.responses.get(shelter)
    }

    /// True when at least one shelter on this match has a recorded answer.
    pub fn has_responses(&self) -> bool {
        self.responses.values().any(|answers| !answers.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> Dog {
        Dog {
            name: "Rex".to_string(),
            size: 3,
            age: 2,
            energy: 4,
        }
    }

    #[test]
    fn attribute_range_bounds_are_inclusive() {
        let range = AttributeRange::new(2, 4);
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(1));
        assert!(!range.contains(5));
    }

    #[test]
    fn single_point_range_accepts_its_value() {
        let range = AttributeRange::new(3, 3);
        assert!(range.contains(3));
        assert!(!range.contains(2));
    }

    #[test]
    fn shelter_requires_every_attribute_in_bounds() {
        let shelter = Shelter {
            name: "A".to_string(),
            size: AttributeRange::new(1, 5),
            age: AttributeRange::new(0, 5),
            energy: AttributeRange::new(1, 5),
        };
        assert!(shelter.accepts(&rex()));

        let picky = Shelter {
            name: "B".to_string(),
            size: AttributeRange::new(4, 5),
            age: AttributeRange::new(0, 5),
            energy: AttributeRange::new(1, 5),
        };
        assert!(!picky.accepts(&rex()), "size 3 below minimum 4");
    }

    #[test]
    fn question_ids_round_trip_numbers() {
        for question in QuestionId::ordered() {
            assert_eq!(QuestionId::from_number(question.number()), Some(question));
        }
        assert_eq!(QuestionId::from_number(0), None);
        assert_eq!(QuestionId::from_number(6), None);
    }

    #[test]
    fn has_responses_ignores_empty_shelter_entries() {
        let mut matched = AdoptionMatch::new(rex(), vec!["A".to_string()]);
        assert!(!matched.has_responses());

        matched.responses.insert("A".to_string(), BTreeMap::new());
        assert!(!matched.has_responses());

        matched
            .responses
            .get_mut("A")
            .expect("entry present")
            .insert(QuestionId::Q1, "yes".to_string());
        assert!(matched.has_responses());
    }
}
