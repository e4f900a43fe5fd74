use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PostField, ValidationError};

/// Post entity - a blog entry that is either published or a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes for a post that has not been stored yet.
///
/// `published` defaults to `false`, so an omitted flag creates a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, published: bool) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            published,
        }
    }

    pub fn draft(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, false)
    }
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl PostChanges {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }
}

impl Post {
    /// Validate the attributes and build a post with a fresh id and timestamps.
    ///
    /// Title and content are stored trimmed.
    pub fn create(new: NewPost) -> Result<Self, ValidationError> {
        let (title, content) = validate(&new.title, &new.content)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            published: new.published,
            created_at: now,
            updated_at: now,
        })
    }

    /// Return a copy with `changes` applied, or the reasons it would be invalid.
    ///
    /// `self` is never modified, so a rejected update leaves no partial state.
    pub fn apply(&self, changes: PostChanges) -> Result<Self, ValidationError> {
        let title = changes.title.as_deref().unwrap_or(&self.title);
        let content = changes.content.as_deref().unwrap_or(&self.content);
        let (title, content) = validate(title, content)?;

        Ok(Self {
            id: self.id,
            title,
            content,
            published: changes.published.unwrap_or(self.published),
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }

    pub fn is_draft(&self) -> bool {
        !self.published
    }
}

fn validate(title: &str, content: &str) -> Result<(String, String), ValidationError> {
    let title = title.trim();
    let content = content.trim();

    let mut blank = Vec::new();
    if title.is_empty() {
        blank.push(PostField::Title);
    }
    if content.is_empty() {
        blank.push(PostField::Content);
    }

    if !blank.is_empty() {
        return Err(ValidationError { blank });
    }

    Ok((title.to_string(), content.to_string()))
}
