use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizAttempt, QuizStats};
use crate::models::dto::request::SubmitQuizAttemptRequest;
use crate::models::dto::response::{QuestionReview, QuizAttemptResponse, QuizAttemptReview};
use crate::repositories::{QuizAttemptRepository, QuizRepository};
use crate::services::{grading, quiz_stats};

pub struct QuizAttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
        }
    }

    async fn load_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }

    /// Scores and stores a student's only attempt at a quiz.
    pub async fn submit_attempt(
        &self,
        quiz_id: &str,
        student_id: &str,
        request: SubmitQuizAttemptRequest,
    ) -> AppResult<QuizAttempt> {
        let quiz = self.load_quiz(quiz_id).await?;

        if !quiz.is_active {
            return Err(AppError::ValidationError(
                "Quiz is not accepting submissions".to_string(),
            ));
        }

        if self
            .attempt_repository
            .has_student_attempted_quiz(&quiz.id, student_id)
            .await?
        {
            log::warn!(
                "Rejected second attempt by '{}' for quiz '{}'",
                student_id,
                quiz.id
            );
            return Err(AppError::DuplicateAttempt(
                "You have already attempted this quiz".to_string(),
            ));
        }

        let submitted_at = Utc::now();
        let started_at = request.started_at.unwrap_or(submitted_at);
        if started_at > submitted_at {
            return Err(AppError::ValidationError(
                "Start time cannot be after the submission time".to_string(),
            ));
        }

        let scored = grading::score_attempt(&quiz, request.answers.as_deref(), submitted_at)?;

        let attempt = QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            student_id: student_id.to_string(),
            answers: scored.answers,
            score: scored.score,
            started_at,
            completed_at: scored.completed_at,
        };

        let attempt = self.attempt_repository.create(attempt).await?;
        log::info!(
            "Attempt '{}' for quiz '{}' scored {} ({}/{} correct)",
            attempt.id,
            attempt.quiz_id,
            attempt.score,
            scored.correct_count,
            scored.total_questions
        );
        Ok(attempt)
    }

    pub async fn get_attempt(&self, attempt_id: &str) -> AppResult<QuizAttempt> {
        self.attempt_repository
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz attempt not found".to_string()))
    }

    pub async fn get_student_attempt(&self, quiz_id: &str, student_id: &str) -> AppResult<QuizAttempt> {
        self.attempt_repository
            .find_by_quiz_and_student(quiz_id, student_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("You have not attempted this quiz yet".to_string())
            })
    }

    pub async fn list_quiz_attempts(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        self.attempt_repository
            .list_by_quiz(quiz_id, offset, limit)
            .await
    }

    pub async fn quiz_stats(&self, quiz_id: &str) -> AppResult<QuizStats> {
        let attempts = self.attempt_repository.find_by_quiz(quiz_id).await?;
        Ok(quiz_stats::aggregate_stats(&attempts))
    }

    /// Pairs each answer with its question. Correct options are included only when
    /// `reveal_answers` is set.
    pub fn review_attempt(attempt: QuizAttempt, quiz: &Quiz, reveal_answers: bool) -> QuizAttemptReview {
        let questions = attempt
            .answers
            .iter()
            .map(|answer| {
                let question = quiz.find_question(&answer.question_id);
                QuestionReview {
                    question_id: answer.question_id.clone(),
                    text: question.map(|q| q.text.clone()),
                    question_type: question.map(|q| q.question_type),
                    selected_option_ids: answer.selected_option_ids.clone(),
                    correct_option_ids: question.filter(|_| reveal_answers).map(|q| {
                        q.correct_option_ids().map(str::to_string).collect()
                    }),
                    is_correct: answer.is_correct,
                }
            })
            .collect();

        QuizAttemptReview {
            attempt: QuizAttemptResponse::from(attempt),
            quiz_title: quiz.title.clone(),
            show_correct_answers: reveal_answers,
            questions,
        }
    }
}
