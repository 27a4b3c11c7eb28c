//! Form options model

use pet_diagnosis_core::Dataset;
use serde::Serialize;

/// Columns the symptom checkboxes are split into
pub const SYMPTOM_GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesOption {
    pub value: String,
    pub label: String,
}

impl SpeciesOption {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: species_label(value),
        }
    }
}

/// Species and symptoms offered by the prediction form
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub species: Vec<SpeciesOption>,
    pub symptoms: Vec<String>,
}

impl FormOptions {
    /// Species in first-appearance order, symptoms in column order
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            species: dataset.species().iter().map(|s| SpeciesOption::new(s)).collect(),
            symptoms: dataset.symptom_columns().to_vec(),
        }
    }

    /// Symptom `i` goes to column `i % 3`
    pub fn symptom_grid(&self) -> Vec<Vec<&str>> {
        let mut grid = vec![Vec::new(); SYMPTOM_GRID_COLUMNS];
        for (i, symptom) in self.symptoms.iter().enumerate() {
            grid[i % SYMPTOM_GRID_COLUMNS].push(symptom.as_str());
        }
        grid
    }
}

/// Display label for a species value
pub fn species_label(value: &str) -> String {
    match value {
        "Dog" => "🐶 Dog".to_string(),
        "Cat" => "🐱 Cat".to_string(),
        "Cow" => "🐮 Cow".to_string(),
        _ => "🐾 Other".to_string(),
    }
}
