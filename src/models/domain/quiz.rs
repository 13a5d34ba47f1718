use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_question::QuizQuestion;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub course_id: String,
    pub created_by_user_id: String,
    pub time_limit: i32, // minutes
    pub is_active: bool,
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub settings: QuizSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Presentation settings. Shuffling happens client side; `allow_retake` is stored but
/// a student still gets a single attempt per quiz.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSettings {
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub show_results: bool,
    pub allow_retake: bool,
}

impl Quiz {
    pub fn new(
        title: &str,
        course_id: &str,
        created_by_user_id: &str,
        time_limit: i32,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            course_id: course_id.to_string(),
            created_by_user_id: created_by_user_id.to_string(),
            time_limit,
            is_active: true,
            questions,
            settings: QuizSettings::default(),
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn find_question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id.trim() == question_id)
    }

    pub fn validate_definition(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz title is required".to_string()));
        }

        if self.time_limit < 1 {
            return Err(AppError::ValidationError(
                "Time limit must be at least 1 minute".to_string(),
            ));
        }

        if self.questions.is_empty() {
            return Err(AppError::ValidationError(
                "Quiz must have at least one question".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if !seen.insert(question.id.trim()) {
                return Err(AppError::ValidationError(format!(
                    "Question {} reuses an existing question ID",
                    index + 1
                )));
            }
            question.validate_definition(index + 1)?;
        }

        Ok(())
    }
}
