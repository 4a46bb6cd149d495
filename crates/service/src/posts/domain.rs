use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A blog post as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
}

/// Create payload. Fields are optional so a missing key surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A create payload that passed presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl CreatePostInput {
    pub fn validate(self) -> Result<NewPost, ServiceError> {
        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok(NewPost { title, content }),
            _ => Err(ServiceError::invalid("Invalid post")),
        }
    }
}

/// Partial update; `None` (absent or null) leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostInput {
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    pub fn key<'a>(&self, post: &'a Post) -> &'a str {
        match self {
            SortField::Title => &post.title,
            SortField::Content => &post.content,
        }
    }
}

impl FromStr for SortField {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "content" => Ok(SortField::Content),
            other => Err(ServiceError::invalid(format!(
                "Invalid sort field '{}': expected 'title' or 'content'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ServiceError::invalid(format!(
                "Invalid sort direction '{}': expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortField::Title => "title",
            SortField::Content => "content",
        })
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// Raw list query as it arrives on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// Validated ordering for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ListQuery {
    /// `sort` and `direction` must be given together or not at all.
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, ServiceError> {
        match (self.sort.as_deref(), self.direction.as_deref()) {
            (None, None) => Ok(None),
            (Some(field), Some(direction)) => Ok(Some(SortSpec {
                field: field.parse()?,
                direction: direction.parse()?,
            })),
            _ => Err(ServiceError::invalid(
                "Both 'sort' and 'direction' parameters must be provided together",
            )),
        }
    }
}

/// Search needles; matching is case-insensitive substring, OR across fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SearchQuery {
    /// An empty needle (`?title=`) counts as not supplied.
    fn needle(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|n| !n.is_empty())
    }

    pub fn ensure_present(&self) -> Result<(), ServiceError> {
        if Self::needle(&self.title).is_none() && Self::needle(&self.content).is_none() {
            return Err(ServiceError::invalid("No data provided"));
        }
        Ok(())
    }

    pub fn matches(&self, post: &Post) -> bool {
        let hit = |needle: &Option<String>, haystack: &str| {
            Self::needle(needle).is_some_and(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
        };
        hit(&self.title, &post.title) || hit(&self.content, &post.content)
    }
}
