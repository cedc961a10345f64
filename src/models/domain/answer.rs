use serde::{Deserialize, Serialize};

/// The option a user picked for one question. Persisted as `{qId, selected}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    #[serde(rename = "qId")]
    pub question_id: u32,
    #[serde(rename = "selected")]
    pub selected_option: String,
}

impl Answer {
    pub fn new(question_id: u32, selected_option: &str) -> Self {
        Answer {
            question_id,
            selected_option: selected_option.to_string(),
        }
    }
}
