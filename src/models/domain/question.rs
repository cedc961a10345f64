use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A single multiple-choice question. Field names on the wire follow the
/// question-bank JSON layout (`question`, `correct`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_correct_option"))]
pub struct Question {
    #[validate(range(min = 1))]
    pub id: u32,
    #[serde(rename = "question")]
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_option: String,
}

impl Question {
    pub fn new(id: u32, text: &str, options: &[&str], correct_option: &str) -> Self {
        Question {
            id,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option: correct_option.to_string(),
        }
    }

    /// Exact, case-sensitive comparison against the correct option.
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option == selected
    }
}

fn validate_correct_option(question: &Question) -> Result<(), ValidationError> {
    if question.options.contains(&question.correct_option) {
        Ok(())
    } else {
        let mut err = ValidationError::new("correct_option_not_in_options");
        err.message = Some(
            format!(
                "question {} lists '{}' as correct but it is not one of its options",
                question.id, question.correct_option
            )
            .into(),
        );
        Err(err)
    }
}
