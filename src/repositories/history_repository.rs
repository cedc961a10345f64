use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::QuizSession,
    repositories::KeyValueStore,
};

/// Storage key holding the JSON array of completed sessions.
pub const HISTORY_KEY: &str = "quizSessions";

/// Durable, append-only log of completed sessions in submission order.
#[cfg_attr(test, mockall::automock)]
pub trait HistoryRepository: Send + Sync {
    /// Never fails: missing, unreadable or corrupt data reads as empty.
    fn load(&self) -> Vec<QuizSession>;
    fn append(&self, session: &QuizSession) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct KvHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl HistoryRepository for KvHistoryRepository {
    fn load(&self) -> Vec<QuizSession> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Could not read quiz history, treating as empty: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<QuizSession>>(&raw) {
            Ok(sessions) => sessions,
            Err(err) => {
                log::warn!("Stored quiz history is corrupt, treating as empty: {}", err);
                Vec::new()
            }
        }
    }

    fn append(&self, session: &QuizSession) -> AppResult<()> {
        // A corrupt log loads as empty, so this write also repairs it.
        let mut sessions = self.load();
        sessions.push(session.clone());

        let raw = serde_json::to_string(&sessions)?;
        self.store.set(HISTORY_KEY, &raw)?;

        log::debug!(
            "Appended session {} to history ({} total)",
            session.id,
            sessions.len()
        );
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.store.remove(HISTORY_KEY)?;
        log::info!("Cleared quiz history");
        Ok(())
    }
}
