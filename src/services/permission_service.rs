use async_trait::async_trait;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied(String),
}

impl PermissionOutcome {
    pub fn from_granted(granted: bool) -> Self {
        if granted {
            PermissionOutcome::Granted
        } else {
            PermissionOutcome::Denied(
                "Webcam access denied. Please allow camera permissions to continue.".to_string(),
            )
        }
    }
}

/// Camera access request. Each call resolves exactly once. The served app
/// does not implement this; the browser reports its outcome over HTTP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    async fn request(&self) -> PermissionOutcome;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum PermissionStatus {
    #[default]
    Unrequested,
    Pending,
    Granted,
    Denied(String),
}

/// Latest camera permission outcome; each new outcome fully replaces the last.
#[derive(Debug, Default)]
pub struct PermissionGate {
    status: PermissionStatus,
}

impl PermissionGate {
    pub fn status(&self) -> &PermissionStatus {
        &self.status
    }

    pub fn is_granted(&self) -> bool {
        self.status == PermissionStatus::Granted
    }

    pub fn mark_pending(&mut self) {
        self.status = PermissionStatus::Pending;
    }

    pub fn resolve(&mut self, outcome: PermissionOutcome) {
        self.status = match outcome {
            PermissionOutcome::Granted => {
                log::info!("Camera permission granted");
                PermissionStatus::Granted
            }
            PermissionOutcome::Denied(reason) => {
                log::warn!("Camera permission denied: {}", reason);
                PermissionStatus::Denied(reason)
            }
        };
    }

    pub fn reset(&mut self) {
        self.status = PermissionStatus::Unrequested;
    }
}
