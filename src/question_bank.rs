use std::{collections::HashSet, fs, path::Path};

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Fixed, ordered set of questions loaded once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "Question bank must contain at least one question".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate question id {}",
                    question.id
                )));
            }
        }

        Ok(Self { questions })
    }

    /// Loads a JSON array of `{id, question, options, correct}` records.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded {} questions from {}",
            questions.len(),
            path.display()
        );
        Self::new(questions)
    }

    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    pub fn by_id(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "What is React?",
            &["Library", "Framework", "IDE", "Tool"],
            "Library",
        ),
        Question::new(
            2,
            "Which hook is used for state management in functional components?",
            &["useEffect", "useState", "useContext", "useReducer"],
            "useState",
        ),
        Question::new(
            3,
            "What does JSX stand for?",
            &[
                "JavaScript XML",
                "Java Syntax Extension",
                "JavaScript Extension",
                "Java XML",
            ],
            "JavaScript XML",
        ),
        Question::new(
            4,
            "Which method is used to render a React component?",
            &["render()", "display()", "show()", "create()"],
            "render()",
        ),
        Question::new(
            5,
            "What is the virtual DOM?",
            &[
                "A copy of the real DOM",
                "A JavaScript representation of the DOM",
                "A server-side DOM",
                "A mobile DOM",
            ],
            "A JavaScript representation of the DOM",
        ),
        Question::new(
            6,
            "Which hook is used for side effects?",
            &["useState", "useEffect", "useContext", "useMemo"],
            "useEffect",
        ),
        Question::new(
            7,
            "What is a React component?",
            &[
                "A function or class that returns JSX",
                "A CSS file",
                "A JavaScript variable",
                "An HTML element",
            ],
            "A function or class that returns JSX",
        ),
        Question::new(
            8,
            "What is props in React?",
            &[
                "Properties passed to components",
                "State variables",
                "CSS styles",
                "Event handlers",
            ],
            "Properties passed to components",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::two_question_bank;

    #[test]
    fn builtin_bank_is_valid() {
        let bank = QuestionBank::builtin();
        let validated = QuestionBank::new(bank.questions().to_vec());

        assert!(validated.is_ok());
        assert_eq!(bank.count(), 8);
    }

    #[test]
    fn lookup_by_id_and_index() {
        let bank = two_question_bank();

        assert_eq!(bank.by_id(2).map(|q| q.correct_option.as_str()), Some("B"));
        assert!(bank.by_id(99).is_none());
        assert_eq!(bank.get(0).map(|q| q.id), Some(1));
        assert!(bank.get(2).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = QuestionBank::new(vec![
            Question::new(1, "Q1", &["A", "B"], "A"),
            Question::new(1, "Q2", &["A", "B"], "B"),
        ]);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn rejects_empty_bank() {
        assert!(matches!(
            QuestionBank::new(vec![]),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_question_whose_answer_is_not_an_option() {
        let result = QuestionBank::new(vec![Question::new(1, "Q1", &["A", "B"], "C")]);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn loads_bank_from_json_file() {
        let dir = crate::test_utils::test_helpers::scratch_dir("bank");
        let path = dir.join("questions.json");
        fs::write(
            &path,
            r#"[{"id":1,"question":"Q1","options":["A","B"],"correct":"A"}]"#,
        )
        .expect("fixture should be written");

        let bank = QuestionBank::from_json_file(&path).expect("bank should load");
        assert_eq!(bank.count(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_bank_file_is_a_storage_error() {
        let result = QuestionBank::from_json_file(Path::new("/nonexistent/questions.json"));

        assert!(matches!(result, Err(AppError::StorageError(_))));
    }
}
