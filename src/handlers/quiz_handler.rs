use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{
        is_quiz_owner_or_admin, require_quiz_author, require_quiz_owner_or_admin,
        AuthenticatedUser, Claims,
    },
    errors::AppError,
    models::{
        domain::Quiz,
        dto::{
            request::{PaginationParams, QuizListFilter, QuizRequest},
            response::{
                DeleteQuizResponse, PaginatedResponse, PaginationMetadata, QuizForTaking,
                QuizResponse, QuizView,
            },
        },
    },
};

/// Owners and admins see the answer key. Everyone else gets the taking view of active quizzes.
fn quiz_view_for(claims: &Claims, quiz: Quiz) -> Result<QuizView, AppError> {
    if is_quiz_owner_or_admin(claims, &quiz) {
        return Ok(QuizView::Full(QuizResponse::from(quiz)));
    }
    if !quiz.is_active {
        return Err(AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id)));
    }
    Ok(QuizView::ForTaking(QuizForTaking::from(quiz)))
}

#[post("/quizzes")]
pub async fn create_quiz(
    state: web::Data<Arc<AppState>>,
    request: web::Json<QuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_quiz_author(&auth.0)?;

    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(QuizResponse::from(quiz)))
}

#[get("/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz_view_for(&auth.0, quiz)?))
}

#[put("/quizzes/{id}")]
pub async fn replace_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<QuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let existing = state.quiz_service.get_quiz(&id).await?;
    require_quiz_owner_or_admin(&auth.0, &existing)?;

    let quiz = state
        .quiz_service
        .replace_quiz(existing, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse::from(quiz)))
}

#[delete("/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let existing = state.quiz_service.get_quiz(&id).await?;
    require_quiz_owner_or_admin(&auth.0, &existing)?;

    let deleted_attempts = state.quiz_service.delete_quiz(&existing.id).await?;
    Ok(HttpResponse::Ok().json(DeleteQuizResponse {
        message: format!("Quiz '{}' deleted", existing.id),
        deleted_attempts,
    }))
}

#[get("/courses/{course_id}/quizzes")]
pub async fn list_course_quizzes(
    state: web::Data<Arc<AppState>>,
    course_id: web::Path<String>,
    pagination: web::Query<PaginationParams>,
    filter: web::Query<QuizListFilter>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    pagination.validate()?;

    let include_inactive = filter.include_inactive && auth.0.role.can_author_quizzes();
    let (offset, limit) = (pagination.offset(), pagination.limit());

    let (quizzes, total) = state
        .quiz_service
        .list_course_quizzes(&course_id, include_inactive, offset, limit)
        .await?;

    let data = quizzes
        .into_iter()
        .filter_map(|quiz| quiz_view_for(&auth.0, quiz).ok())
        .collect();

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        data,
        pagination: PaginationMetadata {
            offset,
            limit,
            total,
        },
    }))
}
