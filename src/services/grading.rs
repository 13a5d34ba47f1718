//! Quiz scoring engine.
//!
//! Validates a submitted answer set against a quiz definition and scores it. Everything here is
//! a pure function of its inputs: no storage access and no clock reads.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuizAttemptAnswer, QuizQuestion, QuizQuestionType, Quiz};
use crate::models::dto::request::QuestionAnswerInput;

/// Outcome of scoring one submission, before it is persisted as an attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredAttempt {
    pub answers: Vec<QuizAttemptAnswer>,
    pub correct_count: usize,
    pub total_questions: usize,
    pub score: i32,
    pub completed_at: DateTime<Utc>,
}

/// Ids are compared after trimming so that `" q1"` and `"q1"` name the same question.
pub fn normalize_id(id: &str) -> &str {
    id.trim()
}

/// Integer division rounding halves up. `denominator` must be non-zero.
fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole` is 0.
pub fn rounded_percentage(part: usize, whole: usize) -> i32 {
    if whole == 0 {
        return 0;
    }
    div_round_half_up(part as u64 * 100, whole as u64) as i32
}

/// Mean of non-negative values rounded half up; 0 for an empty slice.
pub fn rounded_mean(values: &[i32]) -> i32 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|v| (*v).max(0) as u64).sum();
    div_round_half_up(sum, values.len() as u64) as i32
}

/// Scores `submitted` against `quiz`, stamping the result with `submitted_at`.
///
/// Validation fails fast, in order: the answer list must be present, it must hold one entry per
/// question, and each entry must name a question of this quiz (once) and carry an option list.
pub fn score_attempt(
    quiz: &Quiz,
    submitted: Option<&[QuestionAnswerInput]>,
    submitted_at: DateTime<Utc>,
) -> AppResult<ScoredAttempt> {
    if quiz.questions.is_empty() {
        return Err(AppError::ValidationError("Quiz has no questions".to_string()));
    }

    let submitted = submitted.ok_or_else(|| {
        AppError::ValidationError("Answers must be provided as a list".to_string())
    })?;

    if submitted.len() != quiz.questions.len() {
        return Err(AppError::ValidationError(format!(
            "All questions must be answered (expected {}, received {})",
            quiz.questions.len(),
            submitted.len()
        )));
    }

    let mut answered = HashSet::new();
    let mut answers = Vec::with_capacity(submitted.len());

    for (index, answer) in submitted.iter().enumerate() {
        let position = index + 1;
        let question_id = normalize_id(&answer.question);

        let question = quiz.find_question(question_id).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid question ID in answer {}", position))
        })?;

        let selected = answer.selected_options.as_ref().ok_or_else(|| {
            AppError::ValidationError(format!(
                "Selected options must be a list in answer {}",
                position
            ))
        })?;

        if !answered.insert(normalize_id(&question.id)) {
            return Err(AppError::ValidationError(format!(
                "Question answered more than once in answer {}",
                position
            )));
        }

        let selected: BTreeSet<&str> = selected.iter().map(|id| normalize_id(id)).collect();
        let is_correct = grade_question(question, &selected);

        answers.push(QuizAttemptAnswer {
            question_id: normalize_id(&question.id).to_string(),
            selected_option_ids: selected.iter().map(|id| id.to_string()).collect(),
            is_correct,
        });
    }

    let correct_count = answers.iter().filter(|a| a.is_correct).count();
    let total_questions = quiz.questions.len();

    Ok(ScoredAttempt {
        score: rounded_percentage(correct_count, total_questions),
        answers,
        correct_count,
        total_questions,
        completed_at: submitted_at,
    })
}

/// Decides correctness of one question given the (deduplicated, normalized) selection.
pub fn grade_question(question: &QuizQuestion, selected: &BTreeSet<&str>) -> bool {
    let correct: BTreeSet<&str> = question.correct_option_ids().map(normalize_id).collect();

    // A question without a correct option cannot be answered correctly.
    if correct.is_empty() {
        return false;
    }

    match question.question_type {
        QuizQuestionType::Single => {
            selected.len() == 1 && selected.iter().all(|id| correct.contains(id))
        }
        QuizQuestionType::Multiple => *selected == correct,
    }
}
