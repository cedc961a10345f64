use serde::Serialize;

use crate::models::domain::Answer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Live progress of the active attempt. Never persisted directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    pub current_question_index: usize,
    pub answers: Vec<Answer>,
    pub is_started: bool,
    pub is_completed: bool,
    pub start_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl QuizState {
    pub fn started_at(start_time: i64) -> Self {
        QuizState {
            is_started: true,
            start_time,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_started, self.is_completed) {
            (_, true) => SessionPhase::Completed,
            (true, false) => SessionPhase::InProgress,
            (false, false) => SessionPhase::NotStarted,
        }
    }

    pub fn answer_for(&self, question_id: u32) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Replaces the answer for `question_id` in place, or appends a new one.
    pub fn upsert_answer(&mut self, question_id: u32, selected_option: &str) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
        {
            Some(existing) => existing.selected_option = selected_option.to_string(),
            None => self
                .answers
                .push(Answer::new(question_id, selected_option)),
        }
    }
}
