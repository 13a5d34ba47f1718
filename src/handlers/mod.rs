pub mod attempt_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};

use crate::{auth::AuthMiddleware, errors::AppError};

pub use attempt_handler::{
    get_attempt, get_my_attempt, get_quiz_stats, list_quiz_attempts, submit_attempt,
};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{create_quiz, delete_quiz, get_quiz, list_course_quizzes, replace_quiz};

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body for {}: {}", req.path(), err);
    AppError::ValidationError(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// Health probes are public. Everything under `/api` requires a bearer token.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(create_quiz)
                .service(get_quiz)
                .service(replace_quiz)
                .service(delete_quiz)
                .service(list_course_quizzes)
                .service(submit_attempt)
                .service(list_quiz_attempts)
                .service(get_my_attempt)
                .service(get_quiz_stats)
                .service(get_attempt),
        );
}
