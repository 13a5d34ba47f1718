pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod quiz_stats;
pub mod user;
pub use quiz::{Quiz, QuizSettings};
pub use quiz_attempt::{QuizAttempt, QuizAttemptAnswer};
pub use quiz_question::{QuizQuestion, QuizQuestionOption, QuizQuestionType};
pub use quiz_stats::{QuizStats, ScoreDistribution};
pub use user::UserRole;
