use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student's single submission for a quiz. Attempts are never updated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub answers: Vec<QuizAttemptAnswer>,
    pub score: i32, // 0-100
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttemptAnswer {
    pub question_id: String,
    pub selected_option_ids: Vec<String>,
    pub is_correct: bool,
}

impl QuizAttempt {
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds().max(0)
    }
}
