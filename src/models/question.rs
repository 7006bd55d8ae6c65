use serde::{Deserialize, Serialize};

/// A multiple-choice question as pushed to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub wording: String,
    pub answers: Vec<String>,
}

impl Question {
    pub fn new(wording: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            wording: wording.into(),
            answers,
        }
    }

    /// Whether `alternative` names one of this question's answers.
    pub fn has_alternative(&self, alternative: usize) -> bool {
        alternative < self.answers.len()
    }
}
