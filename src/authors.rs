use serde::Deserialize;
use spdlog::{debug, warn};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Author {
    pub key: String,
    pub name: String,
    pub position: String,
    /// Site-relative or absolute image reference
    pub avatar: String,
}

/// Static author lookup, in configuration order.
#[derive(Debug, Default, Clone)]
pub struct AuthorRegistry {
    authors: Vec<Author>,
}

impl AuthorRegistry {
    pub fn new(authors: Vec<Author>) -> AuthorRegistry {
        let mut unique: Vec<Author> = Vec::with_capacity(authors.len());
        for author in authors {
            if unique.iter().any(|a| a.key == author.key) {
                warn!("Duplicate author key {}, keeping the first entry", author.key);
                continue;
            }
            unique.push(author);
        }
        AuthorRegistry { authors: unique }
    }

    /// Unknown keys are "no author", never an error
    pub fn get(&self, key: &str) -> Option<&Author> {
        let author = self.authors.iter().find(|a| a.key == key);
        if author.is_none() {
            debug!("Unknown author key {}", key);
        }
        author
    }

    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
