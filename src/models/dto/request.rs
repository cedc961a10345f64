use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct PermissionRequest {
    pub granted: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(length(min = 1, max = 1000))]
    pub option: String,
}
