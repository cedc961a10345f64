#[cfg(test)]
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::{
        models::domain::{Answer, Question, QuizSession},
        question_bank::QuestionBank,
    };

    /// Two questions: Q1 correct "A", Q2 correct "B".
    pub fn two_question_bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::new(1, "First question", &["A", "B", "C"], "A"),
            Question::new(2, "Second question", &["A", "B", "C"], "B"),
        ])
        .expect("fixture bank should be valid")
    }

    /// A stored session with `score` of `total` correct.
    pub fn session_with_score(id: &str, score: u32, total: u32) -> QuizSession {
        QuizSession {
            id: id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            score,
            total_questions: total,
            answers: vec![Answer::new(1, "A")],
            duration: 30,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::{
        path::PathBuf,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use actix_web::http::StatusCode;

    use crate::{
        app_state::AppState,
        clock::ManualClock,
        config::Config,
        repositories::{InMemoryKeyValueStore, KvHistoryRepository},
    };

    static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Fresh, empty directory under the system temp dir.
    pub fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "proctored-quiz-{}-{}-{}",
            label,
            std::process::id(),
            SCRATCH_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("scratch dir should be created");
        dir
    }

    /// App state over the two-question bank and an in-memory store.
    pub fn in_memory_state() -> Arc<AppState> {
        let history = Arc::new(KvHistoryRepository::new(Arc::new(InMemoryKeyValueStore::new())));
        Arc::new(AppState::with_parts(
            Config::test_config(),
            super::fixtures::two_question_bank(),
            history,
            Arc::new(ManualClock::new(1_000)),
        ))
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, test_helpers::*};

    #[test]
    fn test_fixtures_two_question_bank() {
        let bank = two_question_bank();
        assert_eq!(bank.count(), 2);
        assert_eq!(bank.by_id(1).unwrap().correct_option, "A");
    }

    #[test]
    fn test_scratch_dirs_are_distinct() {
        let first = scratch_dir("distinct");
        let second = scratch_dir("distinct");

        assert_ne!(first, second);
        assert!(first.is_dir() && second.is_dir());

        let _ = std::fs::remove_dir_all(first);
        let _ = std::fs::remove_dir_all(second);
    }
}
