//! Credential lookups on Repository

use super::Repository;

impl Repository {
    /// Whether an exact email/password pair is on file
    pub fn credentials_match(&self, email: &str, password: &str) -> bool {
        self.snapshot()
            .login
            .iter()
            .any(|c| c.matches(email, password))
    }
}
