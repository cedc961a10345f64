use crate::{models::domain::Answer, question_bank::QuestionBank};

pub struct ScoringService;

impl ScoringService {
    /// Number of bank questions whose recorded answer equals the correct
    /// option. Unanswered questions and answers to unknown ids count as zero.
    pub fn score(bank: &QuestionBank, answers: &[Answer]) -> u32 {
        bank.questions()
            .iter()
            .filter(|question| {
                answers.iter().any(|answer| {
                    answer.question_id == question.id && question.is_correct(&answer.selected_option)
                })
            })
            .count() as u32
    }

    /// Whole seconds between two epoch-millisecond instants, floored.
    /// A clock that went backwards yields zero.
    pub fn duration_secs(start_millis: i64, end_millis: i64) -> u64 {
        if end_millis <= start_millis {
            return 0;
        }
        ((end_millis - start_millis) / 1000) as u64
    }
}
