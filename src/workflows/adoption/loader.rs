use super::domain::{AttributeRange, Dog, Shelter};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster data: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct DogRow {
    #[serde(rename = "Dog Name")]
    name: String,
    #[serde(rename = "Size (1-5)")]
    size: u32,
    #[serde(rename = "Age (years)")]
    age: u32,
    #[serde(rename = "Energy Level (1-5)")]
    energy: u32,
}

#[derive(Debug, Deserialize)]
struct ShelterRow {
    #[serde(rename = "Shelter Name")]
    name: String,
    #[serde(rename = "Size Min")]
    size_min: u32,
    #[serde(rename = "Size Max")]
    size_max: u32,
    #[serde(rename = "Age Min")]
    age_min: u32,
    #[serde(rename = "Age Max")]
    age_max: u32,
    #[serde(rename = "Energy Min")]
    energy_min: u32,
    #[serde(rename = "Energy Max")]
    energy_max: u32,
}

/// Parses the dog roster, preserving row order. Missing columns and
/// non-numeric attribute values surface as `LoadError::Csv`.
pub fn load_dogs<R: Read>(reader: R) -> Result<Vec<Dog>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut dogs = Vec::new();

    for record in csv_reader.deserialize::<DogRow>() {
        let row = record?;
        dogs.push(Dog {
            name: row.name,
            size: row.size,
            age: row.age,
            energy: row.energy,
        });
    }

    Ok(dogs)
}

/// Parses the shelter acceptance roster, preserving row order. Range bounds
/// are taken as-is; `min <= max` is not validated here.
pub fn load_shelters<R: Read>(reader: R) -> Result<Vec<Shelter>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut shelters = Vec::new();

    for record in csv_reader.deserialize::<ShelterRow>() {
        let row = record?;
        shelters.push(Shelter {
            name: row.name,
            size: AttributeRange::new(row.size_min, row.size_max),
            age: AttributeRange::new(row.age_min, row.age_max),
            energy: AttributeRange::new(row.energy_min, row.energy_max),
        });
    }

    Ok(shelters)
}

pub fn load_dogs_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Dog>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_dogs(file)
}

pub fn load_shelters_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Shelter>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_shelters(file)
}
