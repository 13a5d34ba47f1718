use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Quiz, dto::request::QuizRequest},
    repositories::{QuizAttemptRepository, QuizRepository},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            repository,
            attempt_repository,
        }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    pub async fn create_quiz(&self, request: QuizRequest, created_by_user_id: &str) -> AppResult<Quiz> {
        request.validate()?;

        let quiz = request.into_quiz(created_by_user_id);
        quiz.validate_definition()?;

        let quiz = self.repository.create(quiz).await?;
        log::info!(
            "Quiz '{}' created by '{}' with {} questions",
            quiz.id,
            created_by_user_id,
            quiz.question_count()
        );
        Ok(quiz)
    }

    /// Replaces the quiz definition as a unit. Id, creator and creation time are kept.
    pub async fn replace_quiz(&self, existing: Quiz, request: QuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = existing;
        request.apply_to(&mut quiz);
        quiz.validate_definition()?;

        let quiz = self.repository.replace(quiz).await?;
        log::info!("Quiz '{}' replaced", quiz.id);
        Ok(quiz)
    }

    /// Deletes the quiz and then every attempt made against it. Returns the attempt count removed.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<u64> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        let deleted_attempts = self.attempt_repository.delete_by_quiz(id).await?;
        log::info!(
            "Quiz '{}' deleted along with {} attempts",
            id,
            deleted_attempts
        );
        Ok(deleted_attempts)
    }

    pub async fn list_course_quizzes(
        &self,
        course_id: &str,
        include_inactive: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.repository
            .list_by_course(course_id, include_inactive, offset, limit)
            .await
    }
}
