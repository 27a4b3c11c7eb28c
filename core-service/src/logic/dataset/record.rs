use serde::{Deserialize, Serialize};

/// One labelled dataset row.
///
/// `symptoms` holds one 0/1 flag per symptom column, in the dataset's
/// column order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub pet_type: String,
    pub symptoms: Vec<u8>,
    pub disease: String,
}

impl DatasetRecord {
    /// Number of symptoms flagged on this row
    pub fn symptom_count(&self) -> usize {
        self.symptoms.iter().filter(|&&f| f == 1).count()
    }
}
