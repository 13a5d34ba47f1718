use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    Quiz, QuizAttempt, QuizAttemptAnswer, QuizQuestion, QuizQuestionOption, QuizQuestionType,
};
use crate::models::dto::request::QuizSettingsDto;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOptionDto {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuizQuestionType,
    pub options: Vec<QuizOptionDto>,
}

impl QuizQuestionDto {
    fn from_question(question: QuizQuestion, reveal_answers: bool) -> Self {
        QuizQuestionDto {
            id: question.id,
            text: question.text,
            question_type: question.question_type,
            options: question
                .options
                .into_iter()
                .map(|option: QuizQuestionOption| QuizOptionDto {
                    id: option.id,
                    text: option.text,
                    is_correct: reveal_answers.then_some(option.is_correct),
                })
                .collect(),
        }
    }
}

/// Full quiz including correctness flags, for the quiz owner and admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub course_id: String,
    pub created_by_user_id: String,
    pub time_limit: i32,
    pub is_active: bool,
    pub settings: QuizSettingsDto,
    pub questions: Vec<QuizQuestionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        QuizResponse {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            course_id: quiz.course_id,
            created_by_user_id: quiz.created_by_user_id,
            time_limit: quiz.time_limit,
            is_active: quiz.is_active,
            settings: quiz.settings.into(),
            questions: quiz
                .questions
                .into_iter()
                .map(|q| QuizQuestionDto::from_question(q, true))
                .collect(),
            created_at: quiz.created_at,
            modified_at: quiz.modified_at,
        }
    }
}

/// Student-facing quiz with every correctness flag stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub course_id: String,
    pub time_limit: i32,
    pub question_count: usize,
    pub settings: QuizSettingsDto,
    pub questions: Vec<QuizQuestionDto>,
}

impl From<Quiz> for QuizForTaking {
    fn from(quiz: Quiz) -> Self {
        QuizForTaking {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            course_id: quiz.course_id,
            time_limit: quiz.time_limit,
            question_count: quiz.questions.len(),
            settings: quiz.settings.into(),
            questions: quiz
                .questions
                .into_iter()
                .map(|q| QuizQuestionDto::from_question(q, false))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuizView {
    Full(QuizResponse),
    ForTaking(QuizForTaking),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptAnswerDto {
    pub question_id: String,
    pub selected_option_ids: Vec<String>,
    pub is_correct: bool,
}

impl From<QuizAttemptAnswer> for QuizAttemptAnswerDto {
    fn from(answer: QuizAttemptAnswer) -> Self {
        QuizAttemptAnswerDto {
            question_id: answer.question_id,
            selected_option_ids: answer.selected_option_ids,
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptResponse {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub answers: Vec<QuizAttemptAnswerDto>,
    pub score: i32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub duration_seconds: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl From<QuizAttempt> for QuizAttemptResponse {
    fn from(attempt: QuizAttempt) -> Self {
        QuizAttemptResponse {
            correct_count: attempt.correct_count(),
            total_questions: attempt.answers.len(),
            duration_seconds: attempt.duration_seconds(),
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            student_id: attempt.student_id,
            answers: attempt
                .answers
                .into_iter()
                .map(QuizAttemptAnswerDto::from)
                .collect(),
            score: attempt.score,
            started_at: attempt.started_at,
            completed_at: attempt.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub question_id: String,
    /// `None` when the question was removed from the quiz after the attempt was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuizQuestionType>,
    pub selected_option_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_ids: Option<Vec<String>>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptReview {
    pub attempt: QuizAttemptResponse,
    pub quiz_title: String,
    pub show_correct_answers: bool,
    pub questions: Vec<QuestionReview>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuizResponse {
    pub message: String,
    pub deleted_attempts: u64,
}

#[derive(Debug, Serialize)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}
