pub mod answer;
pub mod question;
pub mod quiz_session;
pub mod quiz_state;
pub use answer::Answer;
pub use question::Question;
pub use quiz_session::QuizSession;
pub use quiz_state::{QuizState, SessionPhase};
