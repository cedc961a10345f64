use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    coordinator::ViewCoordinator,
    errors::AppError,
    models::dto::request::{PermissionRequest, SelectAnswerRequest},
};

pub(crate) fn screen_response(coordinator: &ViewCoordinator) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(coordinator.screen()?))
}

#[get("/api/screen")]
pub async fn get_screen(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    screen_response(&*state.coordinator.lock().await)
}

#[post("/api/quiz/start")]
pub async fn start_quiz(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.start_quiz()?;
    screen_response(&coordinator)
}

/// Outcome of the browser's camera request; may be posted again to retry.
#[post("/api/quiz/permission")]
pub async fn report_permission(
    state: web::Data<Arc<AppState>>,
    request: web::Json<PermissionRequest>,
) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.resolve_permission(request.granted)?;
    screen_response(&coordinator)
}

#[post("/api/quiz/answer")]
pub async fn select_answer(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SelectAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let mut coordinator = state.coordinator.lock().await;
    coordinator.select_answer(&request.option)?;
    screen_response(&coordinator)
}

#[post("/api/quiz/next")]
pub async fn next_question(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.next_question()?;
    screen_response(&coordinator)
}

#[post("/api/quiz/submit")]
pub async fn submit_quiz(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.submit_quiz()?;
    screen_response(&coordinator)
}

#[post("/api/quiz/retake")]
pub async fn retake_quiz(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.retake();
    screen_response(&coordinator)
}

#[post("/api/home")]
pub async fn back_to_home(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut coordinator = state.coordinator.lock().await;
    coordinator.back_to_home();
    screen_response(&coordinator)
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
