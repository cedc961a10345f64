pub mod history_handler;
pub mod quiz_handler;

use actix_web::web;

pub use history_handler::{clear_history, view_history};
pub use quiz_handler::{
    back_to_home, get_screen, health_check, next_question, report_permission, retake_quiz,
    select_answer, start_quiz, submit_quiz,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_screen)
        .service(start_quiz)
        .service(report_permission)
        .service(select_answer)
        .service(next_question)
        .service(submit_quiz)
        .service(retake_quiz)
        .service(back_to_home)
        .service(view_history)
        .service(clear_history);
}
