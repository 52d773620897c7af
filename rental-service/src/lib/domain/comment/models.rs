use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::Authored;
use crate::domain::comment::errors::CommentIdError;
use crate::domain::comment::errors::CommentTextError;
use crate::domain::comment::errors::RatingError;
use crate::domain::offer::models::OfferId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Comments returned per offer.
pub const COMMENT_LIST_LIMIT: usize = 50;

/// Review left on an offer. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub offer_id: OfferId,
    pub author: UserId,
    pub text: CommentText,
    pub rating: Rating,
    pub post_date: DateTime<Utc>,
}

impl Authored for Comment {
    fn author_id(&self) -> &UserId {
        &self.author
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, CommentIdError> {
        Uuid::parse_str(s)
            .map(CommentId)
            .map_err(|e| CommentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment body, 5 to 1024 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 1024;

    pub fn new(text: String) -> Result<Self, CommentTextError> {
        let text = text.trim().to_string();
        let actual = text.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&actual) {
            return Err(CommentTextError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whole-star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(rating: i64) -> Result<Self, RatingError> {
        if rating < Self::MIN as i64 || rating > Self::MAX as i64 {
            return Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: rating,
            });
        }
        Ok(Self(rating as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    pub text: CommentText,
    pub rating: Rating,
}

/// Comment with its author resolved.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}
