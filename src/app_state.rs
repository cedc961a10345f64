use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    coordinator::ViewCoordinator,
    errors::AppResult,
    question_bank::QuestionBank,
    repositories::{FileKeyValueStore, HistoryRepository, KvHistoryRepository},
};

/// Shared process state. The single coordinator sits behind a mutex so
/// user actions apply one at a time.
pub struct AppState {
    pub coordinator: Mutex<ViewCoordinator>,
    pub bank: Arc<QuestionBank>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let bank = match &config.questions_path {
            Some(path) => QuestionBank::from_json_file(path)?,
            None => QuestionBank::builtin(),
        };

        let store = Arc::new(FileKeyValueStore::new(
            &config.data_dir,
            config.storage_quota_bytes,
        )?);
        let history = Arc::new(KvHistoryRepository::new(store));

        Ok(Self::with_parts(config, bank, history, Arc::new(SystemClock)))
    }

    pub fn with_parts(
        config: Config,
        bank: QuestionBank,
        history: Arc<dyn HistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let bank = Arc::new(bank);
        let coordinator = ViewCoordinator::new(bank.clone(), history, clock);

        Self {
            coordinator: Mutex::new(coordinator),
            bank,
            config: Arc::new(config),
        }
    }
}
