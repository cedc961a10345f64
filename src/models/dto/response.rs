use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::permission_service::PermissionStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreBand::High
        } else if percentage >= 60.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub number: usize,
    pub question_id: u32,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub date: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub message: &'static str,
    pub band: ScoreBand,
    pub duration: String,
    pub review: Vec<QuestionReview>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub date: String,
    pub duration: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub band: ScoreBand,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub attempts: usize,
    pub average_percentage: f64,
    pub best_percentage: u32,
    /// Most recent first.
    pub entries: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScreen {
    pub number: usize,
    pub total: usize,
    pub question_id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub selected: String,
    pub can_proceed: bool,
    pub is_last: bool,
}

/// Data the browser needs to draw the current view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Screen {
    #[serde(rename_all = "camelCase")]
    Home {
        question_count: usize,
        history_count: usize,
    },
    AwaitingPermission {
        permission: PermissionStatus,
    },
    Question {
        question: QuestionScreen,
    },
    Results {
        results: ResultsReport,
        saved: bool,
    },
    History {
        history: HistoryReport,
    },
}
