use std::sync::Arc;

use serde::Serialize;

use crate::{
    clock::Clock,
    errors::{AppError, AppResult},
    models::{
        domain::{QuizSession, SessionPhase},
        dto::response::{QuestionScreen, Screen},
    },
    question_bank::QuestionBank,
    repositories::HistoryRepository,
    services::{
        permission_service::{PermissionGate, PermissionOutcome, PermissionProvider},
        report_service::ReportService,
        session_service::QuizSessionMachine,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Home,
    Quiz,
    Results,
    History,
}

/// Chooses the visible view and routes user actions into the session
/// machine, the permission gate and the history store.
pub struct ViewCoordinator {
    view: View,
    machine: QuizSessionMachine,
    permission: PermissionGate,
    history: Arc<dyn HistoryRepository>,
    bank: Arc<QuestionBank>,
    last_session: Option<QuizSession>,
    last_saved: bool,
}

impl ViewCoordinator {
    pub fn new(
        bank: Arc<QuestionBank>,
        history: Arc<dyn HistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            view: View::Home,
            machine: QuizSessionMachine::new(bank.clone(), clock),
            permission: PermissionGate::default(),
            history,
            bank,
            last_session: None,
            last_saved: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn machine(&self) -> &QuizSessionMachine {
        &self.machine
    }

    pub fn permission(&self) -> &PermissionGate {
        &self.permission
    }

    pub fn last_session(&self) -> Option<&QuizSession> {
        self.last_session.as_ref()
    }

    fn require_view(&self, expected: View, operation: &str) -> AppResult<()> {
        if self.view == expected {
            return Ok(());
        }
        log::debug!("Rejected {} from {:?} view", operation, self.view);
        Err(AppError::InvalidTransition(format!(
            "cannot {} from the {:?} view",
            operation, self.view
        )))
    }

    /// Questions are only reachable once the camera is granted.
    fn require_question_view(&self, operation: &str) -> AppResult<()> {
        self.require_view(View::Quiz, operation)?;
        if !self.permission.is_granted() {
            return Err(AppError::PermissionDenied(
                "camera access is required before answering".to_string(),
            ));
        }
        Ok(())
    }

    pub fn start_quiz(&mut self) -> AppResult<()> {
        self.require_view(View::Home, "start a quiz")?;
        self.machine.start()?;
        self.permission.mark_pending();
        self.view = View::Quiz;
        Ok(())
    }

    /// Asks `provider` for camera access and applies its single outcome.
    /// The HTTP adapter does not use this; it forwards the browser's own
    /// outcome through [`ViewCoordinator::resolve_permission`].
    pub async fn request_permission(
        &mut self,
        provider: &dyn PermissionProvider,
    ) -> AppResult<()> {
        self.require_view(View::Quiz, "request camera permission")?;
        self.permission.mark_pending();
        let outcome = provider.request().await;
        self.permission.resolve(outcome);
        Ok(())
    }

    /// Applies an outcome reported by the browser. A later report replaces
    /// an earlier one, which is how a denied request is retried.
    pub fn resolve_permission(&mut self, granted: bool) -> AppResult<()> {
        self.require_view(View::Quiz, "report camera permission")?;
        self.permission
            .resolve(PermissionOutcome::from_granted(granted));
        Ok(())
    }

    pub fn select_answer(&mut self, option: &str) -> AppResult<()> {
        self.require_question_view("select an answer")?;
        self.machine.select_current(option)
    }

    pub fn can_proceed(&self) -> bool {
        self.view == View::Quiz && self.permission.is_granted() && self.machine.can_proceed()
    }

    pub fn next_question(&mut self) -> AppResult<bool> {
        self.require_question_view("advance")?;
        self.machine.advance()
    }

    pub fn submit_quiz(&mut self) -> AppResult<&QuizSession> {
        self.require_question_view("submit")?;
        let submission = self.machine.submit(self.history.as_ref())?;
        self.last_saved = submission.persisted;
        self.view = View::Results;
        Ok(&*self.last_session.insert(submission.session))
    }

    pub fn view_history(&mut self) -> AppResult<()> {
        match self.view {
            View::Home | View::Results | View::History => {
                self.view = View::History;
                Ok(())
            }
            View::Quiz => Err(AppError::InvalidTransition(
                "cannot open history during a quiz".to_string(),
            )),
        }
    }

    /// Discards the attempt and camera grant, then shows home. Used by
    /// retake and by leaving the history view.
    pub fn back_to_home(&mut self) {
        self.machine.reset();
        self.permission.reset();
        self.view = View::Home;
    }

    pub fn retake(&mut self) {
        self.back_to_home();
    }

    /// Not offered during a quiz; the live attempt is kept.
    pub fn clear_history(&mut self) -> AppResult<()> {
        if self.view == View::Quiz {
            log::debug!("Rejected clear history from Quiz view");
            return Err(AppError::InvalidTransition(
                "cannot clear history during a quiz".to_string(),
            ));
        }
        self.history.clear()?;
        self.back_to_home();
        Ok(())
    }

    pub fn screen(&self) -> AppResult<Screen> {
        let screen = match self.view {
            View::Home => Screen::Home {
                question_count: self.bank.count(),
                history_count: self.history.load().len(),
            },
            View::Quiz if !self.permission.is_granted() => Screen::AwaitingPermission {
                permission: self.permission.status().clone(),
            },
            View::Quiz => Screen::Question {
                question: self.question_screen()?,
            },
            View::Results => {
                let session = self.last_session.as_ref().ok_or_else(|| {
                    AppError::NotFound("no completed quiz to show".to_string())
                })?;
                Screen::Results {
                    results: ReportService::results(session, &self.bank),
                    saved: self.last_saved,
                }
            }
            View::History => Screen::History {
                history: ReportService::history(&self.history.load()),
            },
        };
        Ok(screen)
    }

    fn question_screen(&self) -> AppResult<QuestionScreen> {
        if self.machine.phase() != SessionPhase::InProgress {
            return Err(AppError::InvalidTransition(
                "quiz is not in progress".to_string(),
            ));
        }
        let question = self
            .machine
            .current_question()
            .ok_or_else(|| AppError::NotFound("current question is missing".to_string()))?;

        Ok(QuestionScreen {
            number: self.machine.state().current_question_index + 1,
            total: self.bank.count(),
            question_id: question.id,
            text: question.text.clone(),
            options: question.options.clone(),
            selected: self.machine.current_answer().to_string(),
            can_proceed: self.machine.can_proceed(),
            is_last: self.machine.is_last_question(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        repositories::{history_repository::MockHistoryRepository, InMemoryKeyValueStore, KvHistoryRepository},
        services::permission_service::{MockPermissionProvider, PermissionStatus},
        test_utils::fixtures::two_question_bank,
    };

    fn coordinator() -> (Arc<ManualClock>, Arc<KvHistoryRepository>, ViewCoordinator) {
        let clock = Arc::new(ManualClock::new(1_000));
        let history = Arc::new(KvHistoryRepository::new(Arc::new(InMemoryKeyValueStore::new())));
        let coordinator =
            ViewCoordinator::new(Arc::new(two_question_bank()), history.clone(), clock.clone());
        (clock, history, coordinator)
    }

    fn started_and_granted() -> (Arc<ManualClock>, Arc<KvHistoryRepository>, ViewCoordinator) {
        let (clock, history, mut coordinator) = coordinator();
        coordinator.start_quiz().unwrap();
        coordinator.resolve_permission(true).unwrap();
        (clock, history, coordinator)
    }

    #[test]
    fn starts_on_home() {
        let (_, _, coordinator) = coordinator();

        assert_eq!(coordinator.view(), View::Home);
        assert_eq!(
            coordinator.screen().unwrap(),
            Screen::Home {
                question_count: 2,
                history_count: 0
            }
        );
    }

    #[test]
    fn quiz_view_waits_for_permission() {
        let (_, _, mut coordinator) = coordinator();
        coordinator.start_quiz().unwrap();

        assert_eq!(
            coordinator.screen().unwrap(),
            Screen::AwaitingPermission {
                permission: PermissionStatus::Pending
            }
        );
        assert!(matches!(
            coordinator.select_answer("A"),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn denied_permission_blocks_until_retry_succeeds() {
        let (_, _, mut coordinator) = coordinator();
        coordinator.start_quiz().unwrap();
        coordinator.resolve_permission(false).unwrap();

        assert!(matches!(
            coordinator.screen().unwrap(),
            Screen::AwaitingPermission {
                permission: PermissionStatus::Denied(_)
            }
        ));

        coordinator.resolve_permission(true).unwrap();
        assert!(matches!(
            coordinator.screen().unwrap(),
            Screen::Question { .. }
        ));
    }

    #[actix_rt::test]
    async fn provider_grant_unblocks_questions() {
        let (_, _, mut coordinator) = coordinator();
        coordinator.start_quiz().unwrap();

        let mut provider = MockPermissionProvider::new();
        provider
            .expect_request()
            .times(1)
            .returning(|| PermissionOutcome::Granted);

        coordinator.request_permission(&provider).await.unwrap();
        assert!(coordinator.permission().is_granted());
        assert!(coordinator.select_answer("A").is_ok());
    }

    #[test]
    fn question_screen_reflects_selection() {
        let (_, _, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();

        match coordinator.screen().unwrap() {
            Screen::Question { question } => {
                assert_eq!(question.number, 1);
                assert_eq!(question.total, 2);
                assert_eq!(question.selected, "A");
                assert!(question.can_proceed);
                assert!(!question.is_last);
            }
            other => panic!("expected question screen, got {:?}", other),
        }
    }

    #[test]
    fn submit_moves_to_results_and_saves() {
        let (clock, history, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();
        coordinator.next_question().unwrap();
        coordinator.select_answer("B").unwrap();
        clock.set(5_000);

        let session = coordinator.submit_quiz().unwrap().clone();

        assert_eq!(session.score, 2);
        assert_eq!(coordinator.view(), View::Results);
        assert_eq!(history.load(), vec![session]);
        match coordinator.screen().unwrap() {
            Screen::Results { results, saved } => {
                assert!(saved);
                assert_eq!(results.percentage, 100);
                assert_eq!(results.duration, "0:04");
            }
            other => panic!("expected results screen, got {:?}", other),
        }
    }

    #[test]
    fn results_survive_failed_save() {
        let mut history = MockHistoryRepository::new();
        history
            .expect_append()
            .returning(|_| Err(AppError::StorageError("quota exceeded".to_string())));
        let mut coordinator = ViewCoordinator::new(
            Arc::new(two_question_bank()),
            Arc::new(history),
            Arc::new(ManualClock::new(0)),
        );
        coordinator.start_quiz().unwrap();
        coordinator.resolve_permission(true).unwrap();
        coordinator.select_answer("A").unwrap();

        coordinator.submit_quiz().unwrap();

        match coordinator.screen().unwrap() {
            Screen::Results { results, saved } => {
                assert!(!saved);
                assert_eq!(results.score, 1);
            }
            other => panic!("expected results screen, got {:?}", other),
        }
    }

    #[test]
    fn second_submit_is_rejected() {
        let (_, history, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();
        coordinator.submit_quiz().unwrap();

        assert!(matches!(
            coordinator.submit_quiz(),
            Err(AppError::InvalidTransition(_))
        ));
        assert_eq!(history.load().len(), 1);
    }

    #[test]
    fn retake_resets_session_and_permission() {
        let (_, _, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();
        coordinator.submit_quiz().unwrap();

        coordinator.retake();

        assert_eq!(coordinator.view(), View::Home);
        assert_eq!(coordinator.machine().phase(), SessionPhase::NotStarted);
        assert_eq!(coordinator.permission().status(), &PermissionStatus::Unrequested);
        assert!(coordinator.start_quiz().is_ok());
    }

    #[test]
    fn history_is_not_reachable_mid_quiz() {
        let (_, _, mut coordinator) = started_and_granted();

        assert!(matches!(
            coordinator.view_history(),
            Err(AppError::InvalidTransition(_))
        ));
    }

    #[test]
    fn clear_history_empties_store_and_goes_home() {
        let (_, history, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();
        coordinator.submit_quiz().unwrap();
        coordinator.view_history().unwrap();

        match coordinator.screen().unwrap() {
            Screen::History { history } => assert_eq!(history.attempts, 1),
            other => panic!("expected history screen, got {:?}", other),
        }

        coordinator.clear_history().unwrap();
        assert!(history.load().is_empty());
        assert_eq!(coordinator.view(), View::Home);
    }

    #[test]
    fn clear_history_mid_quiz_keeps_the_attempt() {
        let (_, history, mut coordinator) = started_and_granted();
        history.append(&crate::test_utils::fixtures::session_with_score("500", 1, 2)).unwrap();
        coordinator.select_answer("A").unwrap();

        assert!(matches!(
            coordinator.clear_history(),
            Err(AppError::InvalidTransition(_))
        ));
        assert_eq!(coordinator.view(), View::Quiz);
        assert_eq!(coordinator.machine().phase(), SessionPhase::InProgress);
        assert_eq!(coordinator.machine().current_answer(), "A");
        assert!(coordinator.permission().is_granted());
        assert_eq!(history.load().len(), 1);
    }

    #[test]
    fn clear_history_from_home_stays_home() {
        let (_, history, mut coordinator) = coordinator();
        history.append(&crate::test_utils::fixtures::session_with_score("500", 1, 2)).unwrap();

        coordinator.clear_history().unwrap();

        assert_eq!(coordinator.view(), View::Home);
        assert!(history.load().is_empty());
        assert_eq!(
            coordinator.screen().unwrap(),
            Screen::Home {
                question_count: 2,
                history_count: 0
            }
        );
    }

    #[test]
    fn clear_history_from_results_resets_and_goes_home() {
        let (_, history, mut coordinator) = started_and_granted();
        coordinator.select_answer("A").unwrap();
        coordinator.submit_quiz().unwrap();
        assert_eq!(coordinator.view(), View::Results);

        coordinator.clear_history().unwrap();

        assert_eq!(coordinator.view(), View::Home);
        assert_eq!(coordinator.machine().phase(), SessionPhase::NotStarted);
        assert_eq!(coordinator.permission().status(), &PermissionStatus::Unrequested);
        assert!(history.load().is_empty());
        assert!(coordinator.start_quiz().is_ok());
    }

    #[test]
    fn start_is_only_offered_from_home() {
        let (_, _, mut coordinator) = started_and_granted();

        assert!(matches!(
            coordinator.start_quiz(),
            Err(AppError::InvalidTransition(_))
        ));
    }
}
