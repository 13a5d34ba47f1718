use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{
        can_view_attempt, is_quiz_owner_or_admin, require_quiz_owner_or_admin, require_student,
        AuthenticatedUser,
    },
    errors::AppError,
    models::dto::{
        request::{PaginationParams, SubmitQuizAttemptRequest},
        response::{PaginatedResponse, PaginationMetadata, QuizAttemptResponse},
    },
    services::quiz_attempt_service::QuizAttemptService,
};

#[post("/quizzes/{id}/attempts")]
pub async fn submit_attempt(
    state: web::Data<Arc<AppState>>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitQuizAttemptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let attempt = state
        .quiz_attempt_service
        .submit_attempt(&quiz_id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(QuizAttemptResponse::from(attempt)))
}

#[get("/quizzes/{id}/attempts")]
pub async fn list_quiz_attempts(
    state: web::Data<Arc<AppState>>,
    quiz_id: web::Path<String>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;
    require_quiz_owner_or_admin(&auth.0, &quiz)?;

    let (offset, limit) = (query.offset(), query.limit());
    let (attempts, total) = state
        .quiz_attempt_service
        .list_quiz_attempts(&quiz.id, offset, limit)
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        data: attempts
            .into_iter()
            .map(QuizAttemptResponse::from)
            .collect(),
        pagination: PaginationMetadata {
            offset,
            limit,
            total,
        },
    }))
}

#[get("/quizzes/{id}/attempts/me")]
pub async fn get_my_attempt(
    state: web::Data<Arc<AppState>>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;
    let attempt = state
        .quiz_attempt_service
        .get_student_attempt(&quiz.id, &auth.0.sub)
        .await?;

    let review = QuizAttemptService::review_attempt(attempt, &quiz, quiz.settings.show_results);
    Ok(HttpResponse::Ok().json(review))
}

#[get("/quizzes/{id}/stats")]
pub async fn get_quiz_stats(
    state: web::Data<Arc<AppState>>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&quiz_id).await?;
    require_quiz_owner_or_admin(&auth.0, &quiz)?;

    let stats = state.quiz_attempt_service.quiz_stats(&quiz.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/attempts/{id}")]
pub async fn get_attempt(
    state: web::Data<Arc<AppState>>,
    attempt_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempt = state.quiz_attempt_service.get_attempt(&attempt_id).await?;
    let quiz = state.quiz_service.get_quiz(&attempt.quiz_id).await?;
    can_view_attempt(&auth.0, &attempt, &quiz)?;

    let reveal = quiz.settings.show_results || is_quiz_owner_or_admin(&auth.0, &quiz);
    let review = QuizAttemptService::review_attempt(attempt, &quiz, reveal);
    Ok(HttpResponse::Ok().json(review))
}
