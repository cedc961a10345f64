pub mod app_state;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod question_bank;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub mod test_utils;
