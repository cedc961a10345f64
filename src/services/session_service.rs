use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    clock::Clock,
    errors::{AppError, AppResult},
    models::domain::{Question, QuizSession, QuizState, SessionPhase},
    question_bank::QuestionBank,
    repositories::HistoryRepository,
    services::scoring_service::ScoringService,
};

/// Result of a submission. `persisted` is false when the history write
/// failed; the session is still usable for the results view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub session: QuizSession,
    pub persisted: bool,
}

/// Drives one attempt through `NotStarted -> InProgress -> Completed`.
pub struct QuizSessionMachine {
    bank: Arc<QuestionBank>,
    clock: Arc<dyn Clock>,
    state: QuizState,
}

impl QuizSessionMachine {
    pub fn new(bank: Arc<QuestionBank>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bank,
            clock,
            state: QuizState::default(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    fn require(&self, expected: SessionPhase, operation: &str) -> AppResult<()> {
        let phase = self.phase();
        if phase == expected {
            return Ok(());
        }
        log::debug!("Rejected {} while {:?}", operation, phase);
        Err(AppError::InvalidTransition(format!(
            "cannot {} while quiz is {:?}",
            operation, phase
        )))
    }

    pub fn start(&mut self) -> AppResult<()> {
        self.require(SessionPhase::NotStarted, "start")?;
        self.state = QuizState::started_at(self.clock.now_millis());
        log::info!(
            "Quiz started with {} questions at {}",
            self.bank.count(),
            self.state.start_time
        );
        Ok(())
    }

    /// Records `option` for `question_id`, replacing any earlier choice.
    /// The option itself is trusted as coming from the displayed question.
    pub fn select_answer(&mut self, question_id: u32, option: &str) -> AppResult<()> {
        self.require(SessionPhase::InProgress, "select an answer")?;
        self.state.upsert_answer(question_id, option);
        Ok(())
    }

    /// Selects `option` for the question currently displayed.
    pub fn select_current(&mut self, option: &str) -> AppResult<()> {
        let question_id = self
            .current_question()
            .map(|q| q.id)
            .ok_or_else(|| AppError::InvalidTransition("no question is displayed".to_string()))?;
        self.select_answer(question_id, option)
    }

    /// Moves to the next question. Returns false (and stays put) on the last one.
    pub fn advance(&mut self) -> AppResult<bool> {
        self.require(SessionPhase::InProgress, "advance")?;
        if self.is_last_question() {
            return Ok(false);
        }
        self.state.current_question_index += 1;
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.state = QuizState::default();
    }

    pub fn submit(&mut self, history: &dyn HistoryRepository) -> AppResult<Submission> {
        self.require(SessionPhase::InProgress, "submit")?;

        let end_time = self.clock.now_millis();
        let timestamp = DateTime::<Utc>::from_timestamp_millis(end_time).ok_or_else(|| {
            AppError::InvalidTransition(format!("clock reading {} is out of range", end_time))
        })?;

        let session = QuizSession {
            id: end_time.to_string(),
            timestamp,
            score: ScoringService::score(&self.bank, &self.state.answers),
            total_questions: self.bank.count() as u32,
            answers: self.state.answers.clone(),
            duration: ScoringService::duration_secs(self.state.start_time, end_time),
        };

        self.state.end_time = Some(end_time);
        self.state.is_completed = true;

        log::info!(
            "Quiz submitted: score {}/{} in {}s",
            session.score,
            session.total_questions,
            session.duration
        );

        let persisted = match history.append(&session) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Failed to save session {} to history: {}", session.id, err);
                false
            }
        };

        Ok(Submission { session, persisted })
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase() != SessionPhase::InProgress {
            return None;
        }
        self.bank.get(self.state.current_question_index)
    }

    /// The option recorded for the displayed question, or "" if none.
    pub fn current_answer(&self) -> &str {
        self.current_question()
            .and_then(|q| self.state.answer_for(q.id))
            .map(|a| a.selected_option.as_str())
            .unwrap_or("")
    }

    /// Whether the "next"/"submit" action should be enabled.
    pub fn can_proceed(&self) -> bool {
        !self.current_answer().is_empty()
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_question_index + 1 >= self.bank.count()
    }
}
