use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{
    Quiz, QuizQuestion, QuizQuestionOption, QuizQuestionType, QuizSettings,
};

/// Ids may be sent as JSON strings or integers; both become strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Integer(i64),
}

impl From<IdRepr> for String {
    fn from(id: IdRepr) -> Self {
        match id {
            IdRepr::Text(text) => text,
            IdRepr::Integer(number) => number.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    IdRepr::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_ids<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Option::<Vec<IdRepr>>::deserialize(deserializer)?;
    Ok(ids.map(|ids| ids.into_iter().map(String::from).collect()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswerInput {
    #[serde(alias = "questionId", deserialize_with = "deserialize_id")]
    pub question: String,
    #[serde(default, alias = "selectedOptionIds", deserialize_with = "deserialize_optional_ids")]
    pub selected_options: Option<Vec<String>>,
}

impl QuestionAnswerInput {
    pub fn new(question: &str, selected_options: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            selected_options: Some(selected_options.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizAttemptRequest {
    #[serde(default)]
    pub answers: Option<Vec<QuestionAnswerInput>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizSettingsDto {
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub show_results: bool,
    pub allow_retake: bool,
}

impl From<QuizSettingsDto> for QuizSettings {
    fn from(dto: QuizSettingsDto) -> Self {
        QuizSettings {
            shuffle_questions: dto.shuffle_questions,
            shuffle_options: dto.shuffle_options,
            show_results: dto.show_results,
            allow_retake: dto.allow_retake,
        }
    }
}

impl From<QuizSettings> for QuizSettingsDto {
    fn from(settings: QuizSettings) -> Self {
        QuizSettingsDto {
            shuffle_questions: settings.shuffle_questions,
            shuffle_options: settings.shuffle_options,
            show_results: settings.show_results,
            allow_retake: settings.allow_retake,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizOptionInput {
    pub id: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub text: String,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionInput {
    pub id: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub text: String,

    #[serde(rename = "type", alias = "questionType")]
    pub question_type: QuizQuestionType,

    #[validate(length(min = 2), nested)]
    pub options: Vec<QuizOptionInput>,
}

/// Body of both quiz creation and full replacement.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub course_id: String,

    #[validate(range(min = 1, max = 600))]
    pub time_limit: i32,

    #[serde(default = "default_is_active")]
    pub is_active: bool,

    #[serde(default)]
    pub settings: QuizSettingsDto,

    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuizQuestionInput>,
}

fn default_is_active() -> bool {
    true
}

fn id_or_generated(id: Option<String>) -> String {
    id.map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl From<QuizOptionInput> for QuizQuestionOption {
    fn from(input: QuizOptionInput) -> Self {
        QuizQuestionOption {
            id: id_or_generated(input.id),
            text: input.text,
            is_correct: input.is_correct,
        }
    }
}

impl From<QuizQuestionInput> for QuizQuestion {
    fn from(input: QuizQuestionInput) -> Self {
        QuizQuestion {
            id: id_or_generated(input.id),
            text: input.text,
            question_type: input.question_type,
            options: input.options.into_iter().map(QuizQuestionOption::from).collect(),
        }
    }
}

impl QuizRequest {
    /// Builds a fresh quiz owned by `created_by_user_id`.
    pub fn into_quiz(self, created_by_user_id: &str) -> Quiz {
        let mut quiz = Quiz::new(
            &self.title,
            &self.course_id,
            created_by_user_id,
            self.time_limit,
            Vec::new(),
        );
        self.apply_to(&mut quiz);
        quiz
    }

    /// Replaces the definition of `quiz` while keeping its id, creator and creation time.
    pub fn apply_to(self, quiz: &mut Quiz) {
        quiz.title = self.title;
        quiz.description = self.description.filter(|d| !d.trim().is_empty());
        quiz.course_id = self.course_id;
        quiz.time_limit = self.time_limit;
        quiz.is_active = self.is_active;
        quiz.settings = self.settings.into();
        quiz.questions = self.questions.into_iter().map(QuizQuestion::from).collect();
        quiz.modified_at = Some(Utc::now());
    }
}

/// Filter for listing a course's quizzes. Ignored for students.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizListFilter {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    fn quiz_request_json() -> serde_json::Value {
        json!({
            "title": "Week 1 Check-in",
            "courseId": "course-101",
            "timeLimit": 20,
            "settings": { "showResults": true },
            "questions": [
                {
                    "text": "2 + 2 = ?",
                    "type": "single",
                    "options": [
                        { "text": "3" },
                        { "text": "4", "isCorrect": true }
                    ]
                },
                {
                    "id": "q-primes",
                    "text": "Pick the primes",
                    "type": "multiple",
                    "options": [
                        { "id": "o-2", "text": "2", "isCorrect": true },
                        { "id": "o-3", "text": "3", "isCorrect": true },
                        { "id": "o-4", "text": "4" }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_valid_quiz_request() {
        let request: QuizRequest =
            serde_json::from_value(quiz_request_json()).expect("request should parse");

        assert!(request.validate().is_ok());
        assert!(request.is_active);
        assert!(request.settings.show_results);
        assert!(!request.settings.allow_retake);
    }

    #[test]
    fn test_quiz_request_without_questions_fails_validation() {
        let mut value = quiz_request_json();
        value["questions"] = json!([]);
        let request: QuizRequest = serde_json::from_value(value).expect("request should parse");

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_question_with_single_option_fails_nested_validation() {
        let mut value = quiz_request_json();
        value["questions"][0]["options"] = json!([{ "text": "only", "isCorrect": true }]);
        let request: QuizRequest = serde_json::from_value(value).expect("request should parse");

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_option_text_is_reported_on_the_nested_field() {
        let mut value = quiz_request_json();
        value["questions"][1]["options"][0]["text"] = json!("");
        let request: QuizRequest = serde_json::from_value(value).expect("request should parse");

        let errors = request.validate().expect_err("empty option text should fail");
        assert!(errors.errors().contains_key("questions"));
    }

    #[test]
    fn test_question_list_errors_carry_the_rejected_value() {
        let mut value = quiz_request_json();
        value["questions"][0]["options"] = json!([{ "text": "only" }]);
        let request: QuizRequest = serde_json::from_value(value).expect("request should parse");

        let errors = request.validate().expect_err("one option should fail");
        let json = serde_json::to_value(&errors).expect("errors should serialize");
        assert!(json.to_string().contains("only"));
    }

    #[test]
    fn test_zero_time_limit_fails_validation() {
        let mut value = quiz_request_json();
        value["timeLimit"] = json!(0);
        let request: QuizRequest = serde_json::from_value(value).expect("request should parse");

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_quiz_keeps_supplied_ids_and_generates_missing_ones() {
        let request: QuizRequest =
            serde_json::from_value(quiz_request_json()).expect("request should parse");
        let quiz = request.into_quiz("faculty-1");

        assert_eq!(quiz.created_by_user_id, "faculty-1");
        assert_eq!(quiz.questions.len(), 2);
        assert!(!quiz.questions[0].id.is_empty());
        assert_eq!(quiz.questions[1].id, "q-primes");
        assert_eq!(quiz.questions[1].options[0].id, "o-2");
        assert!(quiz.questions[0].options[1].is_correct);
        assert!(quiz.validate_definition().is_ok());
    }

    #[test]
    fn test_submission_accepts_numeric_and_string_ids() {
        let request: SubmitQuizAttemptRequest = serde_json::from_value(json!({
            "answers": [
                { "question": 7, "selectedOptions": [1, "2"] },
                { "questionId": "q-2", "selectedOptionIds": [] }
            ]
        }))
        .expect("submission should parse");

        let answers = request.answers.expect("answers should be present");
        assert_eq!(answers[0].question, "7");
        assert_eq!(
            answers[0].selected_options,
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(answers[1].question, "q-2");
        assert_eq!(answers[1].selected_options, Some(vec![]));
    }

    #[test]
    fn test_submission_with_missing_fields_parses_to_none() {
        let request: SubmitQuizAttemptRequest =
            serde_json::from_value(json!({})).expect("empty submission should parse");
        assert!(request.answers.is_none());
        assert!(request.started_at.is_none());

        let answer: QuestionAnswerInput =
            serde_json::from_value(json!({ "question": "q-1" })).expect("answer should parse");
        assert!(answer.selected_options.is_none());
    }

    #[test]
    fn test_submission_with_non_list_answers_is_rejected() {
        let parsed = serde_json::from_value::<SubmitQuizAttemptRequest>(json!({
            "answers": "everything"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let params = PaginationParams {
            offset: None,
            limit: Some(500),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
        assert!(params.validate().is_err());
    }
}
