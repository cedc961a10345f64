pub mod permission_service;
pub mod report_service;
pub mod scoring_service;
pub mod session_service;
