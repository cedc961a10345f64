use chrono::{DateTime, Utc};

use crate::{
    models::{
        domain::QuizSession,
        dto::response::{HistoryEntry, HistoryReport, QuestionReview, ResultsReport, ScoreBand},
    },
    question_bank::QuestionBank,
};

pub struct ReportService;

impl ReportService {
    pub fn results(session: &QuizSession, bank: &QuestionBank) -> ResultsReport {
        let percentage = session.percentage();

        let review = bank
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = session
                    .answers
                    .iter()
                    .find(|a| a.question_id == question.id);
                QuestionReview {
                    number: index + 1,
                    question_id: question.id,
                    question: question.text.clone(),
                    your_answer: answer
                        .map(|a| a.selected_option.clone())
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| "No answer".to_string()),
                    correct_answer: question.correct_option.clone(),
                    is_correct: answer.is_some_and(|a| question.is_correct(&a.selected_option)),
                }
            })
            .collect();

        ResultsReport {
            session_id: session.id.clone(),
            timestamp: session.timestamp,
            date: session.timestamp.format("%-m/%-d/%Y").to_string(),
            score: session.score,
            total_questions: session.total_questions,
            percentage,
            message: Self::score_message(percentage),
            band: ScoreBand::from_percentage(f64::from(percentage)),
            duration: Self::format_duration(session.duration),
            review,
        }
    }

    /// Builds the history view from sessions in stored (oldest-first) order.
    pub fn history(sessions: &[QuizSession]) -> HistoryReport {
        let average_percentage = if sessions.is_empty() {
            0.0
        } else {
            let total: f64 = sessions.iter().map(QuizSession::exact_percentage).sum();
            (total / sessions.len() as f64 * 10.0).round() / 10.0
        };

        let best_percentage = sessions
            .iter()
            .map(QuizSession::exact_percentage)
            .fold(0.0_f64, f64::max)
            .round() as u32;

        let entries = sessions
            .iter()
            .rev()
            .map(|session| HistoryEntry {
                id: session.id.clone(),
                timestamp: session.timestamp,
                date: Self::format_date(&session.timestamp),
                duration: Self::format_duration(session.duration),
                score: session.score,
                total_questions: session.total_questions,
                percentage: session.percentage(),
                band: ScoreBand::from_percentage(session.exact_percentage()),
            })
            .collect();

        HistoryReport {
            attempts: sessions.len(),
            average_percentage,
            best_percentage,
            entries,
        }
    }

    pub fn score_message(percentage: u32) -> &'static str {
        match percentage {
            90.. => "Excellent work!",
            80..=89 => "Great job!",
            70..=79 => "Good effort!",
            60..=69 => "Keep practicing!",
            _ => "Consider reviewing the material.",
        }
    }

    /// `m:ss`, minutes unpadded.
    pub fn format_duration(seconds: u64) -> String {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    pub fn format_date(timestamp: &DateTime<Utc>) -> String {
        timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
    }
}
