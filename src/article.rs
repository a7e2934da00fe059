use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils;

pub const TITLE_MAX_LEN: usize = 500;
pub const LINK_MAX_LEN: usize = 1000;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const AUTHORS_MAX_LEN: usize = 500;

/// A stored listing entry. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub description: String,
    pub authors: String,
    pub created_at: DateTime<Utc>,
}

/// An article that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub link: String,
    pub description: String,
    pub authors: String,
    pub created_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn new(title: String, link: String, description: String, authors: String) -> Self {
        NewArticle {
            title,
            link,
            description,
            authors,
            created_at: utils::get_now(),
        }
    }

    /// Applies the column length bounds.
    pub(crate) fn bounded(&self) -> NewArticle {
        NewArticle {
            title: utils::truncate_chars(&self.title, TITLE_MAX_LEN),
            link: utils::truncate_chars(&self.link, LINK_MAX_LEN),
            description: utils::truncate_chars(&self.description, DESCRIPTION_MAX_LEN),
            authors: utils::truncate_chars(&self.authors, AUTHORS_MAX_LEN),
            created_at: self.created_at,
        }
    }

    pub(crate) fn into_article(self, id: i64) -> Article {
        Article {
            id,
            title: self.title,
            link: self.link,
            description: self.description,
            authors: self.authors,
            created_at: self.created_at,
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ID: {}", self.id)?;
        writeln!(f, "  Title: {}", self.title)?;
        writeln!(f, "  Link: {}", self.link)?;
        writeln!(f, "  Authors: '{}'", self.authors)?;
        writeln!(f, "  Description: '{}'", self.description)?;
        writeln!(f, "  Created: {}", self.created_at)
    }
}
