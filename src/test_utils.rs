#[cfg(test)]
pub mod fixtures {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::{ExposeSecret, SecretString};

    use crate::auth::Claims;
    use crate::models::domain::{
        Quiz, QuizQuestion, QuizQuestionOption, QuizQuestionType, UserRole,
    };

    /// Ids of the options in [`two_question_quiz`].
    pub struct QuizIds {
        pub q1: &'static str,
        pub q1_a: &'static str,
        pub q1_b: &'static str,
        pub q1_c: &'static str,
        pub q2: &'static str,
        pub q2_x: &'static str,
        pub q2_y: &'static str,
        pub q2_z: &'static str,
    }

    fn option(id: &str, text: &str, is_correct: bool) -> QuizQuestionOption {
        QuizQuestionOption {
            id: id.to_string(),
            text: text.to_string(),
            is_correct,
        }
    }

    /// Q1 is single choice with B correct, Q2 is multiple choice with X and Y correct.
    pub fn two_question_quiz() -> (Quiz, QuizIds) {
        let ids = QuizIds {
            q1: "q1",
            q1_a: "q1-a",
            q1_b: "q1-b",
            q1_c: "q1-c",
            q2: "q2",
            q2_x: "q2-x",
            q2_y: "q2-y",
            q2_z: "q2-z",
        };

        let q1 = QuizQuestion {
            id: ids.q1.to_string(),
            text: "Which letter comes second?".to_string(),
            question_type: QuizQuestionType::Single,
            options: vec![
                option(ids.q1_a, "A", false),
                option(ids.q1_b, "B", true),
                option(ids.q1_c, "C", false),
            ],
        };
        let q2 = QuizQuestion {
            id: ids.q2.to_string(),
            text: "Select X and Y".to_string(),
            question_type: QuizQuestionType::Multiple,
            options: vec![
                option(ids.q2_x, "X", true),
                option(ids.q2_y, "Y", true),
                option(ids.q2_z, "Z", false),
            ],
        };

        let mut quiz = Quiz::new("Letters", "course-1", "faculty-1", 10, vec![q1, q2]);
        quiz.id = "quiz-1".to_string();
        (quiz, ids)
    }

    /// `count` single choice questions. Question `i` has options `q{i}-right` and `q{i}-wrong`.
    pub fn single_choice_quiz(count: usize) -> Quiz {
        let questions = (1..=count)
            .map(|i| QuizQuestion {
                id: format!("q{}", i),
                text: format!("Question {}", i),
                question_type: QuizQuestionType::Single,
                options: vec![
                    option(&format!("q{}-right", i), "right", true),
                    option(&format!("q{}-wrong", i), "wrong", false),
                ],
            })
            .collect();

        let mut quiz = Quiz::new("Rounding", "course-1", "faculty-1", 30, questions);
        quiz.id = "quiz-rounding".to_string();
        quiz
    }

    /// HS256 token the server accepts when configured with `secret`.
    pub fn sign_token(claims: &Claims, secret: &SecretString) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .expect("claims should sign")
    }

    pub fn claims(sub: &str, role: UserRole) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: sub.to_string(),
            role,
            iat: 0,
            exp: 9999999999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_two_question_quiz() {
        let (quiz, ids) = two_question_quiz();
        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.questions[0].id, ids.q1);
        assert_eq!(quiz.questions[1].correct_option_ids().count(), 2);
    }

    #[test]
    fn test_fixtures_single_choice_quiz() {
        let quiz = single_choice_quiz(3);
        assert_eq!(quiz.question_count(), 3);
        assert!(quiz.validate_definition().is_ok());
    }
}
