use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Verifies access tokens issued by the portal's sign-in service with the shared HS256 secret.
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &SecretString) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::domain::UserRole;
    use crate::test_utils::fixtures::sign_token;

    #[test]
    fn test_jwt_create_and_validate() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret);

        let claims = Claims::new("student-1", "sam", UserRole::Student, 1);
        let token = sign_token(&claims, &config.jwt_secret);

        assert!(!token.is_empty());

        let validated = jwt_service.validate_token(&token).unwrap();
        assert_eq!(validated.sub, "student-1");
        assert_eq!(validated.role, UserRole::Student);
    }

    #[test]
    fn test_jwt_invalid_token() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret);

        let result = jwt_service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_jwt_rejects_token_signed_with_other_secret() {
        let verifier = JwtService::new(&Config::test_config().jwt_secret);

        let token = sign_token(
            &Claims::new("faculty-1", "prof", UserRole::Faculty, 1),
            &SecretString::from("some-other-secret".to_string()),
        );

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        let secret = Config::test_config().jwt_secret;
        let jwt_service = JwtService::new(&secret);
        let token = sign_token(
            &Claims::new("student-1", "sam", UserRole::Student, -2),
            &secret,
        );

        match jwt_service.validate_token(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected Unauthorized error, got {:?}", other.map(|c| c.sub)),
        }
    }
}
