use serde::{Deserialize, Serialize};

/// First disease reported for a crop photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseDiagnosis {
    pub name: String,
    pub description: String,
    pub treatment: String,
}
