use std::{env, path::PathBuf};

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub questions_path: Option<PathBuf>,
    pub storage_quota_bytes: Option<usize>,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("QUIZ_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            questions_path: env::var("QUIZ_QUESTIONS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            storage_quota_bytes: env::var("QUIZ_STORAGE_QUOTA_BYTES")
                .ok()
                .and_then(|q| q.parse().ok()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: env::temp_dir().join("proctored-quiz-test"),
            questions_path: None,
            storage_quota_bytes: None,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
