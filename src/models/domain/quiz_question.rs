use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub const MIN_OPTIONS_PER_QUESTION: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub question_type: QuizQuestionType,
    pub options: Vec<QuizQuestionOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuizQuestionType {
    Single,   // Exactly one correct option
    Multiple, // Any non-empty subset of options is correct
}

impl QuizQuestionOption {
    pub fn new(text: &str, is_correct: bool) -> Self {
        QuizQuestionOption {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_correct,
        }
    }
}

impl QuizQuestion {
    pub fn new(text: &str, question_type: QuizQuestionType, options: Vec<QuizQuestionOption>) -> Self {
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            question_type,
            options,
        }
    }

    pub fn correct_option_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|opt| opt.is_correct)
            .map(|opt| opt.id.as_str())
    }

    /// Checks the structural rules of a question. `position` is 1-based and only used in messages.
    pub fn validate_definition(&self, position: usize) -> AppResult<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Question {} must have text",
                position
            )));
        }

        if self.options.len() < MIN_OPTIONS_PER_QUESTION {
            return Err(AppError::ValidationError(format!(
                "Question {} must have at least {} options",
                position, MIN_OPTIONS_PER_QUESTION
            )));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if option.text.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Every option of question {} must have text",
                    position
                )));
            }
            if !seen.insert(option.id.trim()) {
                return Err(AppError::ValidationError(format!(
                    "Question {} has duplicate option IDs",
                    position
                )));
            }
        }

        let correct_count = self.correct_option_ids().count();
        if correct_count == 0 {
            return Err(AppError::ValidationError(format!(
                "Question {} must have at least one correct option",
                position
            )));
        }
        if self.question_type == QuizQuestionType::Single && correct_count != 1 {
            return Err(AppError::ValidationError(format!(
                "Single choice question {} must have exactly one correct option",
                position
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(flags: &[bool]) -> Vec<QuizQuestionOption> {
        flags
            .iter()
            .enumerate()
            .map(|(i, correct)| QuizQuestionOption::new(&format!("Option {}", i + 1), *correct))
            .collect()
    }

    #[test]
    fn quiz_question_type_uses_lowercase_tags() {
        let json = serde_json::to_string(&QuizQuestionType::Multiple).expect("should serialize");
        assert_eq!(json, "\"multiple\"");

        let parsed: QuizQuestionType =
            serde_json::from_str("\"single\"").expect("should deserialize");
        assert_eq!(parsed, QuizQuestionType::Single);
    }

    #[test]
    fn quiz_question_type_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<QuizQuestionType>("\"essay\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn valid_single_and_multiple_questions_pass() {
        let single = QuizQuestion::new("Pick one", QuizQuestionType::Single, options(&[false, true, false]));
        let multiple = QuizQuestion::new("Pick many", QuizQuestionType::Multiple, options(&[true, true, false]));

        assert!(single.validate_definition(1).is_ok());
        assert!(multiple.validate_definition(2).is_ok());
    }

    #[test]
    fn single_question_with_two_correct_options_is_rejected() {
        let question = QuizQuestion::new("Pick one", QuizQuestionType::Single, options(&[true, true]));

        match question.validate_definition(3) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("exactly one correct")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn question_without_correct_option_is_rejected() {
        let question = QuizQuestion::new("None right", QuizQuestionType::Multiple, options(&[false, false]));
        assert!(question.validate_definition(1).is_err());
    }

    #[test]
    fn question_with_one_option_is_rejected() {
        let question = QuizQuestion::new("Lonely", QuizQuestionType::Single, options(&[true]));
        assert!(question.validate_definition(1).is_err());
    }

    #[test]
    fn blank_option_text_is_rejected() {
        let mut question = QuizQuestion::new("Blank", QuizQuestionType::Single, options(&[true, false]));
        question.options[1].text = "   ".to_string();

        assert!(question.validate_definition(1).is_err());
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let mut question = QuizQuestion::new("Dupes", QuizQuestionType::Multiple, options(&[true, false]));
        question.options[1].id = question.options[0].id.clone();

        assert!(question.validate_definition(1).is_err());
    }
}
