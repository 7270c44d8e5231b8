//! Deterministic in-memory ordering for article listings.
//!
//! # Responsibility
//! - Define the sortable fields and directions of the article store.
//! - Provide the total comparator used by ordered listings.
//!
//! # Invariants
//! - Records without a sort key come first in both directions.
//! - Direction applies to present keys only; the missing-first rule and the
//!   ascending id tie-break never flip.
//! - The comparator is total: distinct records never compare equal, so the
//!   same input always yields the same output order.

use crate::model::article::{Article, ArticleId};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Field an article listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Author => "author",
            Self::Date => "date",
        };
        write!(f, "{name}")
    }
}

/// Direction applied to present sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        };
        write!(f, "{name}")
    }
}

/// Sorts articles by `field`/`direction` under the store's ordering rules.
pub fn sort_articles(articles: &mut [Article], field: SortField, direction: SortDirection) {
    articles.sort_by(|a, b| compare_articles(a, b, field, direction));
}

/// Total comparator behind [`sort_articles`].
///
/// Missing keys sort before present keys regardless of direction. Present
/// keys compare by natural order with `direction` applied. Records that are
/// still tied fall back to ascending id, which is unique.
pub fn compare_articles(
    a: &Article,
    b: &Article,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    match field {
        SortField::Title => compare_by_key(
            Some(a.title.as_str()),
            Some(b.title.as_str()),
            a.id,
            b.id,
            direction,
        ),
        SortField::Content => compare_by_key(
            Some(a.content.as_str()),
            Some(b.content.as_str()),
            a.id,
            b.id,
            direction,
        ),
        SortField::Author => {
            compare_by_key(a.author.as_deref(), b.author.as_deref(), a.id, b.id, direction)
        }
        SortField::Date => compare_by_key(a.date, b.date, a.id, b.id, direction),
    }
}

fn compare_by_key<K: Ord>(
    a_key: Option<K>,
    b_key: Option<K>,
    a_id: ArticleId,
    b_id: ArticleId,
    direction: SortDirection,
) -> Ordering {
    let by_key = match (a_key, b_key) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
    };
    by_key.then(a_id.cmp(&b_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article(id: ArticleId, author: Option<&str>, date: Option<NaiveDate>) -> Article {
        Article {
            id,
            title: format!("Title {id}"),
            content: format!("Content {id}"),
            author: author.map(str::to_string),
            date,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn ids(articles: &[Article]) -> Vec<ArticleId> {
        articles.iter().map(|article| article.id).collect()
    }

    #[test]
    fn missing_author_sorts_first_in_both_directions() {
        let mut articles = vec![
            article(1, Some("Shakespeare"), None),
            article(2, None, None),
            article(3, Some("Cartland"), None),
        ];

        sort_articles(&mut articles, SortField::Author, SortDirection::Ascending);
        assert_eq!(ids(&articles), vec![2, 3, 1]);

        sort_articles(&mut articles, SortField::Author, SortDirection::Descending);
        assert_eq!(ids(&articles), vec![2, 1, 3]);
    }

    #[test]
    fn missing_date_sorts_first_in_both_directions() {
        let mut articles = vec![
            article(1, None, Some(date(2022, 1, 2))),
            article(2, None, None),
            article(3, None, Some(date(2022, 1, 1))),
        ];

        sort_articles(&mut articles, SortField::Date, SortDirection::Ascending);
        assert_eq!(ids(&articles), vec![2, 3, 1]);

        sort_articles(&mut articles, SortField::Date, SortDirection::Descending);
        assert_eq!(ids(&articles), vec![2, 1, 3]);
    }

    #[test]
    fn direction_applies_to_present_keys_only() {
        let a = article(1, Some("Austen"), None);
        let b = article(2, None, None);

        let asc = compare_articles(&a, &b, SortField::Author, SortDirection::Ascending);
        let desc = compare_articles(&a, &b, SortField::Author, SortDirection::Descending);
        assert_eq!(asc, Ordering::Greater);
        assert_eq!(desc, Ordering::Greater);
    }

    #[test]
    fn equal_keys_fall_back_to_ascending_id() {
        let mut articles = vec![
            article(5, Some("Cartland"), None),
            article(2, Some("Cartland"), None),
            article(9, Some("Cartland"), None),
        ];

        sort_articles(&mut articles, SortField::Author, SortDirection::Descending);
        assert_eq!(ids(&articles), vec![2, 5, 9]);
    }

    #[test]
    fn missing_keys_fall_back_to_ascending_id() {
        let mut articles = vec![article(7, None, None), article(3, None, None)];

        sort_articles(&mut articles, SortField::Date, SortDirection::Descending);
        assert_eq!(ids(&articles), vec![3, 7]);
    }

    #[test]
    fn titles_compare_by_byte_order() {
        let mut articles = vec![
            article(1, None, None),
            article(2, None, None),
        ];
        articles[0].title = "apple".to_string();
        articles[1].title = "Banana".to_string();

        sort_articles(&mut articles, SortField::Title, SortDirection::Ascending);
        // Uppercase bytes precede lowercase in UTF-8.
        assert_eq!(articles[0].title, "Banana");
        assert_eq!(articles[1].title, "apple");
    }

    #[test]
    fn empty_author_is_a_present_key() {
        let mut articles = vec![
            article(1, Some("Cartland"), None),
            article(2, Some(""), None),
            article(3, None, None),
        ];

        sort_articles(&mut articles, SortField::Author, SortDirection::Ascending);
        assert_eq!(ids(&articles), vec![3, 2, 1]);

        sort_articles(&mut articles, SortField::Author, SortDirection::Descending);
        assert_eq!(ids(&articles), vec![3, 1, 2]);
    }
}
