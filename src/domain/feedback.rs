//! Free-text feedback ("suggestion") record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub subject: String,
    pub suggestion: String,
}

impl Feedback {
    /// All three fields are required.
    ///
    /// # Errors
    /// Returns the list of blank fields.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = [
            ("Your Name", &self.name),
            ("Subject", &self.subject),
            ("Your Suggestion", &self.suggestion),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| format!("{label} is required"))
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
