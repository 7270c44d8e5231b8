//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical article record and its identifier.
//! - Own presence validation for the required text fields.
//! - Model partial field sets for create (`ArticleDraft`) and update
//!   (`ArticleChanges`) flows.
//!
//! # Invariants
//! - `id` is assigned by the store, monotone in creation order, and never
//!   reassigned after a destroy.
//! - `title` and `content` must be non-empty after whitespace trim before a
//!   record may be persisted.
//! - `author = None` (absent) is distinct from `Some("")` (explicitly
//!   empty); no silent normalization happens on either.
//! - `date` carries a calendar date only; date-time inputs are truncated at
//!   the API boundary.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store at creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ArticleId = i64;

/// Presence-validation failure for required article fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleValidationError {
    /// `title` is missing or empty after trimming whitespace.
    MissingTitle,
    /// `content` is missing or empty after trimming whitespace.
    MissingContent,
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => {
                write!(f, "article title must be present (non-empty after trim)")
            }
            Self::MissingContent => {
                write!(f, "article content must be present (non-empty after trim)")
            }
        }
    }
}

impl Error for ArticleValidationError {}

/// Presence rule shared by create and update validation: a required text
/// field counts as present only when non-empty after whitespace trim.
pub fn is_present(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Canonical persisted article record.
///
/// Instances are materialized by the store; the `id` field is only
/// meaningful for records that have been persisted at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedArticle")]
pub struct Article {
    /// Store-assigned id; monotone in creation order, never reused.
    pub id: ArticleId,
    /// Required headline text.
    pub title: String,
    /// Required body text.
    pub content: String,
    /// Optional byline. `None` means no author was recorded.
    pub author: Option<String>,
    /// Optional publication date (calendar date, no time component).
    pub date: Option<NaiveDate>,
}

impl Article {
    /// Checks the presence invariants for `title` and `content`.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        if !is_present(&self.title) {
            return Err(ArticleValidationError::MissingTitle);
        }
        if !is_present(&self.content) {
            return Err(ArticleValidationError::MissingContent);
        }
        Ok(())
    }

    /// Boolean form of [`Article::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Mirror shape used to re-validate articles arriving from serialized input.
///
/// Keeps invalid wire data from masquerading as a persisted record.
#[derive(Deserialize)]
struct UncheckedArticle {
    id: ArticleId,
    title: String,
    content: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl TryFrom<UncheckedArticle> for Article {
    type Error = ArticleValidationError;

    fn try_from(raw: UncheckedArticle) -> Result<Self, Self::Error> {
        let article = Article {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            author: raw.author,
            date: raw.date,
        };
        article.validate()?;
        Ok(article)
    }
}

/// Validated projection of a draft's required fields.
///
/// Returned by [`ArticleDraft::validate`] so persistence code can use the
/// checked values without re-unwrapping options.
#[derive(Debug, Clone, Copy)]
pub struct RequiredFields<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Field set submitted to `create`.
///
/// Every field is optional so presence validation stays a queryable outcome
/// instead of a constructor precondition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ArticleDraft {
    /// Creates a draft with both required fields filled in.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Sets the author byline.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the publication date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the publication date from a date-time moment, truncating the
    /// time component.
    pub fn with_datetime(mut self, moment: NaiveDateTime) -> Self {
        self.date = Some(moment.date());
        self
    }

    /// Checks presence of the required fields, returning them on success.
    pub fn validate(&self) -> Result<RequiredFields<'_>, ArticleValidationError> {
        let title = self
            .title
            .as_deref()
            .filter(|title| is_present(title))
            .ok_or(ArticleValidationError::MissingTitle)?;
        let content = self
            .content
            .as_deref()
            .filter(|content| is_present(content))
            .ok_or(ArticleValidationError::MissingContent)?;
        Ok(RequiredFields { title, content })
    }

    /// Boolean form of [`ArticleDraft::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Partial field set merged by `update`.
///
/// Required fields can only be replaced. Optional fields use a two-level
/// `Option` so that leaving a field untouched stays distinct from
/// explicitly clearing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleChanges {
    title: Option<String>,
    content: Option<String>,
    author: Option<Option<String>>,
    date: Option<Option<NaiveDate>>,
}

impl ArticleChanges {
    /// Creates an empty change set that touches no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the author byline.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(Some(author.into()));
        self
    }

    /// Clears the author byline.
    pub fn clear_author(mut self) -> Self {
        self.author = Some(None);
        self
    }

    /// Sets the publication date.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(Some(date));
        self
    }

    /// Sets the publication date from a date-time moment, truncating the
    /// time component.
    pub fn datetime(mut self, moment: NaiveDateTime) -> Self {
        self.date = Some(Some(moment.date()));
        self
    }

    /// Clears the publication date.
    pub fn clear_date(mut self) -> Self {
        self.date = Some(None);
        self
    }

    /// Returns whether the change set touches no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.date.is_none()
    }

    /// Merges the change set into `article`, leaving untouched fields as-is.
    ///
    /// Merging performs no validation; callers re-validate the merged record
    /// before persisting it.
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(author) = &self.author {
            article.author = author.clone();
        }
        if let Some(date) = &self.date {
            article.date = *date;
        }
    }
}
