//! The persisted library document

use serde::{Deserialize, Serialize};

use super::{book::Book, credential::Credential};

/// Complete persisted state: `{ login, books }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub login: Vec<Credential>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Document {
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn book_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }
}
