use serde::{Deserialize, Serialize};

/// Portal role carried in the access token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl UserRole {
    pub fn can_author_quizzes(&self) -> bool {
        matches!(self, UserRole::Faculty | UserRole::Admin)
    }
}
