pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::{
    can_view_attempt, is_quiz_owner_or_admin, require_quiz_author, require_quiz_owner_or_admin,
    require_student,
};
