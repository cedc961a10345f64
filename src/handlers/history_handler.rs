use std::sync::Arc;

use actix_web::{delete, get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, handlers::quiz_handler::screen_response};

#[get("/api/history")]
pub async fn view_history(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.view_history()?;
    screen_response(&coordinator)
}

#[delete("/api/history")]
pub async fn clear_history(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.clear_history()?;
    screen_response(&coordinator)
}
