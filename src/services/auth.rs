//! Librarian authentication

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::LoginRequest,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check an email/password pair against the stored credentials
    pub fn authenticate(&self, email: &str, password: &str) -> bool {
        self.repository.credentials_match(email, password)
    }

    /// Validate a login request and authenticate it
    pub fn login(&self, request: &LoginRequest) -> AppResult<()> {
        request.validate()?;

        if !self.authenticate(&request.email, &request.password) {
            tracing::warn!("Failed login attempt for {}", request.email);
            return Err(AppError::InvalidCredentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Credential, Document},
        repository::JsonStore,
    };

    fn service() -> AuthService {
        let document = Document {
            login: vec![Credential {
                email: "bibliotecaria@escola.br".to_string(),
                password: "livros123".to_string(),
            }],
            books: vec![],
        };
        AuthService::new(Repository::new(JsonStore::new("unused.json"), document))
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_login_exact_match() {
        let service = service();
        assert!(service.login(&request("bibliotecaria@escola.br", "livros123")).is_ok());
        assert!(matches!(
            service.login(&request("bibliotecaria@escola.br", "Livros123")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login(&request("outra@escola.br", "livros123")),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let service = service();
        assert!(matches!(
            service.login(&request("not-an-email", "livros123")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.login(&request("bibliotecaria@escola.br", "")),
            Err(AppError::Validation(_))
        ));
    }
}
