//! Article store use-case service.
//!
//! # Responsibility
//! - Provide the stable article-store entry points for core callers.
//! - Merge partial change sets into full records before persistence.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - On update, the in-memory record is written back only after the store
//!   accepted the merged record.
//! - Service layer remains storage-agnostic.

use crate::model::article::{Article, ArticleChanges, ArticleDraft, ArticleId};
use crate::ordering::{SortDirection, SortField};
use crate::repo::article_repo::{ArticleRepository, RepoResult};

/// Use-case facade over an article repository implementation.
pub struct ArticleStore<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleStore<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a draft.
    ///
    /// # Contract
    /// - Returns the stored record carrying its fresh store-assigned id.
    /// - On validation failure nothing is persisted and the store is
    ///   unchanged.
    pub fn create_article(&self, draft: &ArticleDraft) -> RepoResult<Article> {
        self.repo.create_article(draft)
    }

    /// Returns the number of live records.
    pub fn count_articles(&self) -> RepoResult<u64> {
        self.repo.count_articles()
    }

    /// Returns the live record with the given id.
    ///
    /// Returns `RepoError::NotFound` for ids that were never assigned or
    /// whose record has been destroyed.
    pub fn find_article(&self, id: ArticleId) -> RepoResult<Article> {
        self.repo.find_article(id)
    }

    /// Merges a change set into the record and persists the result.
    ///
    /// # Contract
    /// - Fields the change set does not mention keep their current values.
    /// - The merged record is re-validated before anything is written.
    /// - On success `article` reflects the persisted state; on any failure
    ///   it is left untouched.
    pub fn update_article(
        &self,
        article: &mut Article,
        changes: &ArticleChanges,
    ) -> RepoResult<()> {
        let mut merged = article.clone();
        changes.apply_to(&mut merged);
        self.repo.update_article(&merged)?;
        *article = merged;
        Ok(())
    }

    /// Destroys the record, consuming the in-memory handle.
    ///
    /// The record's id is permanently unresolvable afterwards; it is never
    /// reassigned to a later create.
    pub fn destroy_article(&self, article: Article) -> RepoResult<()> {
        self.repo.destroy_article(article.id)
    }

    /// Lists all live records in creation (id) order.
    pub fn list_articles(&self) -> RepoResult<Vec<Article>> {
        self.repo.list_articles()
    }

    /// Lists all live records ordered by `field`/`direction`.
    ///
    /// Records without a value for `field` come first in both directions;
    /// remaining ties resolve by ascending id.
    pub fn order_articles(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> RepoResult<Vec<Article>> {
        self.repo.order_articles(field, direction)
    }

    /// Lists live records whose title or content contains `query` as a
    /// case-sensitive substring, in creation (id) order.
    ///
    /// The empty query matches every record.
    pub fn search_articles(&self, query: &str) -> RepoResult<Vec<Article>> {
        self.repo.search_articles(query)
    }
}
