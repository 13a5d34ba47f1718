use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizAttempt, UserRole},
};

pub fn require_quiz_author(claims: &Claims) -> AppResult<()> {
    if !claims.role.can_author_quizzes() {
        return Err(AppError::Forbidden(
            "Only faculty and admins can manage quizzes".to_string(),
        ));
    }
    Ok(())
}

pub fn require_student(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Student {
        return Err(AppError::Forbidden(
            "Only students can submit quiz attempts".to_string(),
        ));
    }
    Ok(())
}

pub fn is_quiz_owner_or_admin(claims: &Claims, quiz: &Quiz) -> bool {
    claims.role == UserRole::Admin
        || (claims.role == UserRole::Faculty && claims.sub == quiz.created_by_user_id)
}

pub fn require_quiz_owner_or_admin(claims: &Claims, quiz: &Quiz) -> AppResult<()> {
    if !is_quiz_owner_or_admin(claims, quiz) {
        return Err(AppError::Forbidden(
            "Only the quiz owner or an admin can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Students see their own attempts; the quiz owner and admins see every attempt of the quiz.
pub fn can_view_attempt(claims: &Claims, attempt: &QuizAttempt, quiz: &Quiz) -> AppResult<()> {
    if claims.sub == attempt.student_id || is_quiz_owner_or_admin(claims, quiz) {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You can only view your own quiz attempts".to_string(),
    ))
}
