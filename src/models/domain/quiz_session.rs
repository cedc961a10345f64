use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::Answer;

/// A completed attempt, snapshotted at submission and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<Answer>,
    pub duration: u64,
}

impl QuizSession {
    /// Rounded percentage of correct answers; 0 for an empty bank.
    pub fn percentage(&self) -> u32 {
        self.exact_percentage().round() as u32
    }

    pub fn exact_percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_session(score: u32, total_questions: u32) -> QuizSession {
        QuizSession {
            id: "1700000000000".to_string(),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            score,
            total_questions,
            answers: vec![Answer::new(1, "Library")],
            duration: 42,
        }
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let json = serde_json::to_value(make_session(1, 2)).expect("session should serialize");

        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["totalQuestions"], 2);
        assert_eq!(json["answers"][0]["qId"], 1);
        assert_eq!(json["duration"], 42);
        assert!(json["timestamp"].as_str().unwrap().starts_with("2023-11-14T22:13:20"));
    }

    #[test]
    fn parses_browser_written_sessions() {
        let json = r#"{"id":"1700000000000","timestamp":"2023-11-14T22:13:20.000Z","score":6,"totalQuestions":8,"answers":[{"qId":1,"selected":"Library"}],"duration":95}"#;
        let session: QuizSession = serde_json::from_str(json).expect("session should deserialize");

        assert_eq!(session.score, 6);
        assert_eq!(session.total_questions, 8);
        assert_eq!(session.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn percentage_rounds_and_handles_empty_bank() {
        assert_eq!(make_session(2, 3).percentage(), 67);
        assert_eq!(make_session(1, 8).percentage(), 13);
        assert_eq!(make_session(0, 0).percentage(), 0);
    }
}
